use derive_builder::Builder;

/// Configuration for the demo window and what gets drawn in it.
///
/// The following pattern is recommended when creating a config:
///
/// ```
/// use quad_demo::Config;
///
/// let config = Config {
///     /* specify whichever fields you need to set, for example: */
///     window_size: (800, 600),
///     resizable: true,
///     .. Default::default()
/// };
/// # assert_eq!(config.gl_version, (3, 3));
/// ```
///
/// Or, with the generated builder:
///
/// ```
/// use quad_demo::ConfigBuilder;
///
/// let config = ConfigBuilder::default()
///     .window_title("wireframe")
///     .alternate_polygon_mode(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.window_size, (640, 480));
/// ```
#[derive(Clone, PartialEq, Debug, Builder)]
#[builder(default, setter(into))]
pub struct Config {
    pub window_title: String,
    /// Logical size of the window. The viewport follows the physical size.
    pub window_size: (u32, u32),
    /// Requested OpenGL version as `(major, minor)`.
    pub gl_version: (u8, u8),
    pub core_profile: bool,
    pub debug_context: bool,
    /// Block on the display's vertical sync when swapping (swap interval 1).
    pub vsync: bool,
    pub resizable: bool,
    pub clear_color: [f32; 4],
    pub quad_color: [f32; 4],
    /// When false every frame is drawn filled.
    pub alternate_polygon_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_title: "glfw window".to_string(),
            window_size: (640, 480),
            gl_version: (3, 3),
            core_profile: true,
            debug_context: true,
            vsync: true,
            resizable: false,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            quad_color: [1.0, 0.5, 0.2, 1.0],
            alternate_polygon_mode: true,
        }
    }
}

/// Builds a [`Config`] from `field: value` pairs, leaving the rest at their defaults.
///
/// ```
/// use quad_demo::config;
///
/// let config = config! {
///     window_title: String::from("quad"),
///     resizable: true
/// };
/// assert!(config.resizable);
/// assert_eq!(config.window_title, "quad");
/// ```
#[macro_export]
macro_rules! config {
    {$($k:ident: $v:expr),+ $(,)?} => {
        $crate::Config {
            $($k: $v),+,
            ..Default::default()
        }
    };
    {} => {
        <$crate::Config as Default>::default()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_tutorial_window() {
        let config = Config::default();
        assert_eq!(config.window_title, "glfw window");
        assert_eq!(config.window_size, (640, 480));
        assert_eq!(config.gl_version, (3, 3));
        assert!(config.core_profile);
        assert!(config.debug_context);
        assert!(config.vsync);
        assert!(!config.resizable);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert_eq!(config.quad_color, [1.0, 0.5, 0.2, 1.0]);
        assert!(config.alternate_polygon_mode);
    }

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = ConfigBuilder::default()
            .window_size((1024, 768))
            .build()
            .unwrap();
        assert_eq!(config.window_size, (1024, 768));
        assert_eq!(config.window_title, Config::default().window_title);
        assert_eq!(config.clear_color, Config::default().clear_color);
    }

    #[test]
    fn macro_overrides_only_named_fields() {
        let config = config! {
            vsync: false,
            quad_color: [0.0, 1.0, 0.0, 1.0],
        };
        assert!(!config.vsync);
        assert_eq!(config.quad_color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(config.gl_version, (3, 3));
    }

    #[test]
    fn empty_macro_is_default() {
        assert_eq!(config! {}, Config::default());
    }
}
