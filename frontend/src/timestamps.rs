use chrono::{DateTime, SecondsFormat, Utc};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::config::TimestampConfig;
use crate::dom;
use crate::error::Result;
use crate::timeago::parse_timestamp;

/// Where the parsed instant is kept once the element's text has been
/// replaced by a phrase.
pub const INSTANT_ATTRIBUTE: &str = "data-timeago";

pub struct TimestampRenderer {
    config: TimestampConfig,
}

impl TimestampRenderer {
    pub fn new(config: TimestampConfig) -> Self {
        TimestampRenderer { config }
    }

    /// Renders every timestamp now, then keeps them fresh on the configured
    /// interval.
    pub fn start(self, document: &Document) -> Result<()> {
        self.render_all(document, Utc::now())?;

        if self.config.refresh_millis == 0 {
            return Ok(());
        }

        let millis = i32::try_from(self.config.refresh_millis).unwrap_or(i32::MAX);
        let document = document.clone();
        let refresh = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) = self.render_all(&document, Utc::now()) {
                log::warn!("could not refresh timestamps: {}", err);
            }
        });

        dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            refresh.as_ref().unchecked_ref(),
            millis,
        )?;
        refresh.forget();
        Ok(())
    }

    pub fn render_all(&self, document: &Document, now: DateTime<Utc>) -> Result<usize> {
        let mut rendered = 0;
        for element in dom::query_all(document, &self.config.selector)? {
            if self.render(&element, now)? {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Replaces the element's text with e.g. "5 mins ago". Elements without a
    /// recognizable timestamp keep their text.
    pub fn render(&self, element: &Element, now: DateTime<Utc>) -> Result<bool> {
        let instant = match element.get_attribute(INSTANT_ATTRIBUTE) {
            Some(stored) => parse_timestamp(&stored),
            None => self.remember(element)?,
        };

        let Some(instant) = instant else {
            return Ok(false);
        };

        let phrase = self
            .config
            .strings
            .relative(instant, now, self.config.allow_future);
        element.set_text_content(Some(&phrase));
        Ok(true)
    }

    fn remember(&self, element: &Element) -> Result<Option<DateTime<Utc>>> {
        let is_time = element.tag_name().eq_ignore_ascii_case("time");
        let text = element
            .text_content()
            .map(|text| text.trim().to_owned())
            .unwrap_or_default();

        let attribute = if is_time { "datetime" } else { "title" };

        // a title may just be a tooltip, so the text still gets a chance
        let instant = element
            .get_attribute(attribute)
            .and_then(|raw| parse_timestamp(&raw))
            .or_else(|| parse_timestamp(&text));

        let Some(instant) = instant else {
            log::debug!("no timestamp in {} or {:?}", attribute, text);
            return Ok(None);
        };

        let keeps_title = is_time && element.has_attribute("title");
        if !text.is_empty() && !keeps_title {
            element.set_attribute("title", &text)?;
        }
        element.set_attribute(
            INSTANT_ATTRIBUTE,
            &instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;

        Ok(Some(instant))
    }
}
