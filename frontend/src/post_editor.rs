use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlTextAreaElement};

use crate::api::PostsApi;
use crate::config::EditorConfig;
use crate::dom;
use crate::error::{Error, Result};
use crate::markdown;
use crate::post::PostId;
use crate::session::{EditSession, EditState};

pub const BODY_SELECTOR: &str = ".post-body";
pub const FOOTER_SELECTOR: &str = ".md-footer";
pub const EDITED_MARKER_SELECTOR: &str = ".edited-marker";
pub const SAVE_BUTTON_SELECTOR: &str = ".post-edit-save-btn";
pub const CANCEL_BUTTON_SELECTOR: &str = ".post-edit-cancel-btn";
pub const CONTROL_SELECTOR: &str = ".btn";

const SAVE_LABEL: &str = "Save";
const CANCEL_LABEL: &str = "Cancel";

/// Inline editing for one post: the edit control, the post's body region and
/// the session tracking where in the edit lifecycle the post is.
pub struct PostEditor<A> {
    id: PostId,
    document: Document,
    edit_btn: Element,
    post: Element,
    body: Element,
    api: Rc<A>,
    config: Rc<EditorConfig>,
    session: RefCell<EditSession>,
}

impl<A: PostsApi + 'static> PostEditor<A> {
    pub fn new(
        document: &Document,
        edit_btn: Element,
        api: Rc<A>,
        config: Rc<EditorConfig>,
    ) -> Result<Rc<Self>> {
        let id = PostId::from_control(&edit_btn)?;
        let post = dom::element_by_id(document, &id.dom_id())?;
        let body = dom::query(&post, BODY_SELECTOR)?;

        let editor = Rc::new(PostEditor {
            id,
            document: document.clone(),
            edit_btn,
            post,
            body,
            api,
            config,
            session: RefCell::new(EditSession::new()),
        });
        editor.delegate_editor_buttons()?;
        Ok(editor)
    }

    /// Save and Cancel are recreated on every activation, so their clicks are
    /// caught once on the post instead of per button.
    fn delegate_editor_buttons(self: &Rc<Self>) -> Result<()> {
        let editor = Rc::clone(self);
        dom::on_click_within(&self.post, SAVE_BUTTON_SELECTOR, move |_| {
            let editor = Rc::clone(&editor);
            spawn_local(async move {
                if let Err(err) = editor.save().await {
                    editor.report("save", &err);
                }
            });
        })?;

        let editor = Rc::clone(self);
        dom::on_click_within(&self.post, CANCEL_BUTTON_SELECTOR, move |_| {
            if let Err(err) = editor.cancel() {
                editor.report("cancel", &err);
            }
        })
    }

    /// Wires every edit control on the page. Controls whose post cannot be
    /// found are skipped.
    pub fn bind_all(document: &Document, api: Rc<A>, config: Rc<EditorConfig>) -> Result<Vec<Rc<Self>>> {
        let mut editors = Vec::new();

        for edit_btn in dom::query_all(document, &config.edit_selector)? {
            let editor = match PostEditor::new(document, edit_btn, Rc::clone(&api), Rc::clone(&config)) {
                Ok(editor) => editor,
                Err(err) => {
                    log::warn!("skipping edit control: {}", err);
                    continue;
                }
            };
            editor.listen()?;
            editors.push(editor);
        }

        log::debug!("bound {} edit controls", editors.len());
        Ok(editors)
    }

    fn listen(self: &Rc<Self>) -> Result<()> {
        let editor = Rc::clone(self);
        dom::on_click(&self.edit_btn, move || {
            let editor = Rc::clone(&editor);
            spawn_local(async move {
                if let Err(err) = editor.activate().await {
                    editor.report("load", &err);
                }
            });
        })
    }

    fn report(&self, step: &str, err: &Error) {
        match err {
            Error::StaleResponse { .. } => log::warn!("post {}: {}", self.id, err),
            Error::InvalidTransition { .. } => log::debug!("post {}: ignoring click, {}", self.id, err),
            _ => log::error!("post {}: {} failed: {}", self.id, step, err),
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn state(&self) -> EditState {
        self.session.borrow().state()
    }

    /// The editor's textarea, while the post is being edited.
    pub fn textarea(&self) -> Result<HtmlTextAreaElement> {
        Ok(dom::query(&self.body, "textarea")?.unchecked_into())
    }

    /// Swaps the rendered body for the editor, seeded with the post's raw text.
    ///
    /// The edit control is disabled before the request goes out and stays
    /// disabled until the edit is cancelled or saved.
    pub async fn activate(self: &Rc<Self>) -> Result<()> {
        let ticket = self.session.borrow_mut().begin(self.body.inner_html())?;
        dom::set_disabled_class(&self.edit_btn, true)?;
        self.body.set_inner_html(&self.config.loading_html);
        log::debug!("post {}: loading edit #{}", self.id, ticket.generation());

        match self.api.fetch_raw(&self.id).await {
            Ok(raw) => {
                self.session.borrow_mut().loaded(ticket)?;
                self.show_editor(&raw)
            }
            Err(err) => {
                if self.session.borrow().is_current(ticket, EditState::Loading) {
                    self.show_load_failure()?;
                }
                Err(err)
            }
        }
    }

    fn show_editor(&self, raw: &str) -> Result<()> {
        let editor = dom::create(&self.document, "div", "post-editor md-editor")?;

        let textarea: HtmlTextAreaElement = dom::create(&self.document, "textarea", "md-input")?.unchecked_into();
        // set before the widget is attached so the text is never parsed as html
        textarea.set_value(raw);
        textarea.set_attribute("rows", "10")?;
        textarea.set_attribute("style", "resize: vertical;")?;
        editor.append_child(&textarea)?;

        let footer = dom::create(&self.document, "div", "md-footer")?;
        let save = dom::button(&self.document, "btn btn-success post-edit-save-btn", SAVE_LABEL)?;
        footer.append_child(&save)?;
        editor.append_child(&footer)?;

        self.body.set_inner_html("");
        self.body.append_child(&editor)?;
        self.append_cancel()
    }

    fn show_load_failure(&self) -> Result<()> {
        let footer = dom::create(&self.document, "div", "md-footer")?;
        let notice = dom::create(&self.document, "span", "text-danger")?;
        notice.set_text_content(Some(&self.config.load_failed_text));
        footer.append_child(&notice)?;

        self.body.set_inner_html("");
        self.body.append_child(&footer)?;
        self.append_cancel()
    }

    fn append_cancel(&self) -> Result<()> {
        let footer = dom::query(&self.post, FOOTER_SELECTOR)?;
        let cancel = dom::button(&self.document, "btn btn-default post-edit-cancel-btn", CANCEL_LABEL)?;
        cancel.set_attribute("style", "margin-left: 5px;")?;
        footer.append_child(&cancel)?;
        Ok(())
    }

    /// Puts back exactly what the body showed before the edit started.
    pub fn cancel(&self) -> Result<()> {
        let prior_html = self.session.borrow_mut().cancel()?;
        self.body.set_inner_html(&prior_html);
        dom::set_disabled_class(&self.edit_btn, false)
    }

    /// Sends the edited text and shows the server's version of the post.
    pub async fn save(self: &Rc<Self>) -> Result<()> {
        let text = self.textarea()?.value();
        let save_btn = dom::query(&self.body, SAVE_BUTTON_SELECTOR)?;
        let ticket = self.session.borrow_mut().start_save()?;

        self.set_controls_disabled(true)?;
        save_btn.set_text_content(Some(&self.config.saving_label));

        match self.api.update_text(&self.id, &text).await {
            Ok(post) => {
                self.session.borrow_mut().saved(ticket)?;
                self.body.set_inner_html(&markdown::to_html(&post.text));
                dom::set_disabled_class(&self.edit_btn, false)?;
                self.mark_edited()
            }
            Err(err) => {
                if self.session.borrow_mut().save_failed(ticket).is_ok() {
                    save_btn.set_text_content(Some(SAVE_LABEL));
                    self.set_controls_disabled(false)?;
                }
                Err(err)
            }
        }
    }

    fn set_controls_disabled(&self, disabled: bool) -> Result<()> {
        for control in dom::query_all_in(&self.body, CONTROL_SELECTOR)? {
            dom::set_disabled_attribute(&control, disabled)?;
        }
        Ok(())
    }

    fn mark_edited(&self) -> Result<()> {
        match self.post.query_selector(EDITED_MARKER_SELECTOR)? {
            Some(marker) => marker.set_inner_html(&self.config.edited_marker),
            None => log::warn!("post {} has no {}", self.id, EDITED_MARKER_SELECTOR),
        }
        Ok(())
    }
}
