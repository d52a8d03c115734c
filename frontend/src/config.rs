use log::LevelFilter;
use web_sys::Document;

use crate::error::{Error, Result};
use crate::timeago::TimeagoStrings;

/// Id of the optional `<script type="application/json">` element a page can
/// use to override any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "forum-config";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub log_level: LevelFilter,
    pub timestamps: TimestampConfig,
    pub editor: EditorConfig,
    pub reply: ReplyConfig,
    pub bodies: BodiesConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimestampConfig {
    pub selector: String,
    /// How often rendered timestamps are recomputed; 0 renders them once.
    pub refresh_millis: u32,
    pub allow_future: bool,
    pub strings: TimeagoStrings,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub edit_selector: String,
    pub loading_html: String,
    pub saving_label: String,
    pub edited_marker: String,
    pub load_failed_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplyConfig {
    pub button_selector: String,
    pub textarea_selector: String,
    pub loading_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodiesConfig {
    pub selector: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: "/api/posts".into(),
            log_level: LevelFilter::Info,
            timestamps: TimestampConfig::default(),
            editor: EditorConfig::default(),
            reply: ReplyConfig::default(),
            bodies: BodiesConfig::default(),
        }
    }
}

impl Default for TimestampConfig {
    fn default() -> Self {
        TimestampConfig {
            selector: ".timeago".into(),
            refresh_millis: 60_000,
            allow_future: false,
            strings: TimeagoStrings::default(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            edit_selector: ".post-edit-btn".into(),
            loading_html: r#"<span><img src="/img/spinner.gif"> Loading edit form...</span>"#.into(),
            saving_label: "Saving...".into(),
            edited_marker: " edited".into(),
            load_failed_text: "Could not load this post for editing.".into(),
        }
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        ReplyConfig {
            button_selector: ".post-reply-btn".into(),
            textarea_selector: "#reply-form textarea".into(),
            loading_label: "Loading...".into(),
        }
    }
}

impl Default for BodiesConfig {
    fn default() -> Self {
        BodiesConfig {
            selector: ".post-body".into(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::Config(err.to_string()))
    }

    /// Reads the page's config element, falling back to the defaults when the
    /// page has none. A malformed blob is an error so the caller can log it.
    pub fn from_page(document: &Document) -> Result<Self> {
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(element) => {
                let json = element.text_content().unwrap_or_default();
                if json.trim().is_empty() {
                    return Ok(Config::default());
                }
                Config::from_json(&json)
            }
            None => Ok(Config::default()),
        }
    }
}
