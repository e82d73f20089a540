// Components module - reusable UI building blocks
//
// Leaves first:
// - Status badge: tier-colored status code chip
// - Exchange row: one `[status] METHOD path` line
// - Exchange list: fetched rows with single selection, publishes selections
// - Tabs: generic button/panel group with exactly one active tab
// - Detail tabs: request/response panels fed by selection notifications
//
// Shell components (title bar, status bar, toast) read the App directly.

pub mod detail_tabs;
pub mod exchange_list;
pub mod exchange_row;
pub mod scrollbar;
pub mod status_badge;
pub mod status_bar;
pub mod tabs;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
