extern crate console_error_panic_hook;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod logger;
pub mod markdown;
pub mod post;
pub mod post_bodies;
pub mod post_editor;
pub mod quote;
pub mod reply_quoter;
pub mod session;
pub mod timeago;
pub mod timestamps;

use std::rc::Rc;

use log::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::api::HttpPostsApi;
use crate::config::Config;
use crate::post_editor::PostEditor;
use crate::reply_quoter::ReplyQuoter;
use crate::timestamps::TimestampRenderer;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(contents: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    pub fn log_warn(contents: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn log_error(contents: &str);
}

/// Entry point called by the topic page once the module is loaded.
#[wasm_bindgen]
pub fn bootstrap() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    logger::init_logger(LevelFilter::Info);

    let started = dom::document().and_then(|document| {
        let page = document.clone();
        dom::on_ready(&document, move || run(&page))
    });

    if let Err(err) = started {
        log::error!("forum scripts did not start: {}", err);
    }
}

pub fn load_config(document: &Document) -> Config {
    match Config::from_page(document) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("using default config: {}", err);
            Config::default()
        }
    }
}

/// Runs every page handler once. A handler that fails is logged and does not
/// keep the others from running.
pub fn run(document: &Document) {
    let config = load_config(document);
    logger::init_logger(config.log_level);

    // bodies first, so an edit snapshot holds rendered html
    if let Err(err) = post_bodies::render_all(document, &config.bodies) {
        log::error!("could not render post bodies: {}", err);
    }

    if let Err(err) = TimestampRenderer::new(config.timestamps.clone()).start(document) {
        log::error!("could not render timestamps: {}", err);
    }

    let api = Rc::new(HttpPostsApi::new(config.api_base.clone()));

    if let Err(err) = PostEditor::bind_all(document, Rc::clone(&api), Rc::new(config.editor.clone())) {
        log::error!("could not bind edit controls: {}", err);
    }

    if let Err(err) = ReplyQuoter::bind_all(document, api, Rc::new(config.reply.clone())) {
        log::error!("could not bind reply controls: {}", err);
    }
}
