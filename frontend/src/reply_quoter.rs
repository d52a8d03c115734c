use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions};

use crate::api::PostsApi;
use crate::config::ReplyConfig;
use crate::dom;
use crate::error::{Error, Result};
use crate::post::PostId;
use crate::quote;

/// A post's reply control, quoting that post into the page's reply form.
pub struct ReplyQuoter<A> {
    id: PostId,
    button: Element,
    reply: HtmlTextAreaElement,
    api: Rc<A>,
    config: Rc<ReplyConfig>,
    in_flight: Cell<bool>,
}

impl<A: PostsApi + 'static> ReplyQuoter<A> {
    pub fn new(
        button: Element,
        reply: HtmlTextAreaElement,
        api: Rc<A>,
        config: Rc<ReplyConfig>,
    ) -> Result<Rc<Self>> {
        Ok(Rc::new(ReplyQuoter {
            id: PostId::from_control(&button)?,
            button,
            reply,
            api,
            config,
            in_flight: Cell::new(false),
        }))
    }

    /// Wires every reply control to the page's reply textarea. Pages without a
    /// reply form get no handlers.
    pub fn bind_all(document: &Document, api: Rc<A>, config: Rc<ReplyConfig>) -> Result<Vec<Rc<Self>>> {
        let Some(reply) = document.query_selector(&config.textarea_selector)? else {
            log::debug!("no {} on this page, reply quoting is off", config.textarea_selector);
            return Ok(Vec::new());
        };
        let reply: HtmlTextAreaElement = reply
            .dyn_into()
            .map_err(|_| Error::MissingElement(config.textarea_selector.clone()))?;

        let mut quoters = Vec::new();
        for button in dom::query_all(document, &config.button_selector)? {
            let quoter = match ReplyQuoter::new(button, reply.clone(), Rc::clone(&api), Rc::clone(&config)) {
                Ok(quoter) => quoter,
                Err(err) => {
                    log::warn!("skipping reply control: {}", err);
                    continue;
                }
            };
            quoter.listen()?;
            quoters.push(quoter);
        }

        log::debug!("bound {} reply controls", quoters.len());
        Ok(quoters)
    }

    fn listen(self: &Rc<Self>) -> Result<()> {
        let quoter = Rc::clone(self);
        dom::on_click(&self.button, move || {
            let quoter = Rc::clone(&quoter);
            spawn_local(async move {
                if let Err(err) = quoter.quote().await {
                    log::error!("post {}: quoting failed: {}", quoter.id, err);
                }
            });
        })
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    /// Fetches the post's raw text and appends it, quoted, to the reply draft.
    /// Clicks while a fetch is pending are ignored.
    pub async fn quote(self: &Rc<Self>) -> Result<()> {
        if self.in_flight.replace(true) {
            return Ok(());
        }

        let label = self.button.inner_html();
        dom::set_disabled_class(&self.button, true)?;
        self.button.set_inner_html(&self.config.loading_label);

        let fetched = self.api.fetch_raw(&self.id).await;

        self.in_flight.set(false);
        dom::set_disabled_class(&self.button, false)?;
        self.button.set_inner_html(&label);

        self.append_quote(&fetched?)
    }

    fn append_quote(&self, raw: &str) -> Result<()> {
        let draft = quote::compose_draft(&self.reply.value(), &quote::quote_lines(raw));

        self.reply.focus()?;
        self.reply.set_value(&draft);
        self.reply.set_scroll_top(self.reply.scroll_height());

        let window = dom::window()?;
        let options = ScrollToOptions::new();
        options.set_top(dom::page_offset_top(&window, &self.reply)?);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }
}
