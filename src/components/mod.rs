pub mod current_panel;
pub mod forecast_display;
pub mod hourly_list;
pub mod location_header;
pub mod lookup_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use current_panel::{CurrentPanel, CurrentPanelProps, ERROR_ICON};
pub use forecast_display::{ForecastDisplay, ForecastDisplayProps};
pub use hourly_list::{HourlyList, HourlyListProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use lookup_overlay::{LookupOverlay, LookupOverlayProps};
