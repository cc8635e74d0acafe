// DOM hooks shared with static/index.html and static/style.css

// Element ids
pub const SHAPES_CONTAINER_ID: &str = "shapes";
pub const NAV_ID: &str = "site-nav";
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_DRAWER_ID: &str = "nav-drawer";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

// Links that close the drawer when followed
pub const NAV_LINK_SELECTOR: &str = "#site-nav a[href^='#']";

// Classes toggled by the page chrome
pub const CLASS_NAV_GLASS: &str = "glass"; // on the nav bar
pub const CLASS_DRAWER_OPEN: &str = "open"; // on the drawer
pub const CLASS_BODY_LOCKED: &str = "drawer-open"; // on <body>, blocks scroll

// Parallax output, written on <html>
pub const CSS_VAR_MX: &str = "--mx";
pub const CSS_VAR_MY: &str = "--my";

// Media queries
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
