//! Rendering surface: the three data regions, the search input, a notice
//! line for loading/error messages, and the map.

use std::fmt;

use crate::map::MapHandle;
use crate::render::Fragment;

pub const LOADING_TEXT: &str = "Loading weather data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Current,
    Forecast,
    Conditions,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Current, Region::Forecast, Region::Conditions];

    pub fn heading(&self) -> &'static str {
        match self {
            Region::Current => "Current weather",
            Region::Forecast => "5-day forecast",
            Region::Conditions => "Conditions",
        }
    }
}

/// Status line shown instead of data while loading or after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading,
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loading => f.write_str(LOADING_TEXT),
            Notice::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Where the dashboard writes its output.
///
/// `replace` must drop whatever the region held before.
pub trait RenderSurface {
    fn replace(&mut self, region: Region, fragment: Fragment);
    fn region(&self, region: Region) -> &Fragment;

    fn set_notice(&mut self, notice: Option<Notice>);
    fn notice(&self) -> Option<&Notice>;

    fn search_text(&self) -> &str;
    fn set_search_text(&mut self, text: &str);

    fn map(&mut self) -> &mut MapHandle;

    fn clear_regions(&mut self) {
        for region in Region::ALL {
            self.replace(region, Fragment::Empty);
        }
    }

    fn show_loading(&mut self) {
        self.clear_regions();
        self.set_notice(Some(Notice::Loading));
    }

    fn show_error(&mut self, message: &str) {
        self.clear_regions();
        self.set_notice(Some(Notice::Error(message.to_string())));
    }
}

/// In-memory surface. The terminal front-end prints it; tests inspect it.
#[derive(Debug)]
pub struct Screen {
    current: Fragment,
    forecast: Fragment,
    conditions: Fragment,
    notice: Option<Notice>,
    search_text: String,
    map: MapHandle,
}

impl Screen {
    pub fn new(map: MapHandle) -> Self {
        Self {
            current: Fragment::Empty,
            forecast: Fragment::Empty,
            conditions: Fragment::Empty,
            notice: None,
            search_text: String::new(),
            map,
        }
    }

    pub fn map_ref(&self) -> &MapHandle {
        &self.map
    }

    fn slot(&mut self, region: Region) -> &mut Fragment {
        match region {
            Region::Current => &mut self.current,
            Region::Forecast => &mut self.forecast,
            Region::Conditions => &mut self.conditions,
        }
    }
}

impl RenderSurface for Screen {
    fn replace(&mut self, region: Region, fragment: Fragment) {
        *self.slot(region) = fragment;
    }

    fn region(&self, region: Region) -> &Fragment {
        match region {
            Region::Current => &self.current,
            Region::Forecast => &self.forecast,
            Region::Conditions => &self.conditions,
        }
    }

    fn set_notice(&mut self, notice: Option<Notice>) {
        self.notice = notice;
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    fn map(&mut self) -> &mut MapHandle {
        &mut self.map
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }
        for region in Region::ALL {
            let fragment = self.region(region);
            if fragment.is_empty() {
                continue;
            }
            writeln!(f, "\n== {} ==", region.heading())?;
            write!(f, "{fragment}")?;
        }
        writeln!(f, "\n== Map ==")?;
        write!(f, "{}", self.map)
    }
}
