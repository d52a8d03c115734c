use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Node, NodeList, Window};

use crate::error::{Error, Result};

pub const DISABLED_CLASS: &str = "disabled";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::MissingElement("document".into()))
}

/// First element under `scope` matching `selector`.
pub fn query(scope: &Element, selector: &str) -> Result<Element> {
    scope
        .query_selector(selector)?
        .ok_or_else(|| Error::MissingElement(selector.into()))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn query_all_in(scope: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(scope.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement(format!("#{}", id)))
}

pub fn create(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub fn button(document: &Document, class: &str, label: &str) -> Result<Element> {
    let button = create(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_text_content(Some(label));
    Ok(button)
}

/// Toggles the `disabled` class the forum's stylesheet greys controls out
/// with. Links styled as buttons have no `disabled` attribute.
pub fn set_disabled_class(element: &Element, disabled: bool) -> Result<()> {
    let classes = element.class_list();
    if disabled {
        classes.add_1(DISABLED_CLASS)?;
    } else {
        classes.remove_1(DISABLED_CLASS)?;
    }
    Ok(())
}

pub fn has_disabled_class(element: &Element) -> bool {
    element.class_list().contains(DISABLED_CLASS)
}

pub fn set_disabled_attribute(element: &Element, disabled: bool) -> Result<()> {
    if disabled {
        element.set_attribute("disabled", "")?;
    } else {
        element.remove_attribute("disabled")?;
    }
    Ok(())
}

/// Calls `handler` on every click, with the default action and propagation
/// already stopped.
pub fn on_click(element: &Element, mut handler: impl FnMut() + 'static) -> Result<()> {
    let click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        event.stop_propagation();
        handler();
    });

    element.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

/// One listener on `scope` for clicks on any descendant matching `selector`,
/// including descendants added later. Other clicks pass through untouched.
pub fn on_click_within(
    scope: &Element,
    selector: &'static str,
    mut handler: impl FnMut(Element) + 'static,
) -> Result<()> {
    let root = scope.clone();
    let click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let matched = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(selector).ok().flatten())
            .filter(|target| {
                let node: &Node = target;
                root.contains(Some(node))
            });

        if let Some(target) = matched {
            event.prevent_default();
            event.stop_propagation();
            handler(target);
        }
    });

    scope.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();
    Ok(())
}

/// Runs `run` once the document has been parsed, right away if it already
/// has been.
pub fn on_ready(document: &Document, run: impl FnOnce() + 'static) -> Result<()> {
    if document.ready_state() != "loading" {
        run();
        return Ok(());
    }

    let ready = Closure::once(run);
    document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
    ready.forget();
    Ok(())
}

/// Distance from the top of the page to the top of `element`, in CSS pixels.
pub fn page_offset_top(window: &Window, element: &Element) -> Result<f64> {
    Ok(element.get_bounding_client_rect().top() + window.scroll_y()?)
}
