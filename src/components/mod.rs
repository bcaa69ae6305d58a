pub mod notice;
pub mod reading_view;
pub mod search_bar;
pub mod theme;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use notice::{Notice, NoticeProps};
pub use reading_view::{ReadingView, ReadingViewProps};
pub use search_bar::{SearchBar, SearchBarProps, SEARCH_PLACEHOLDER};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
