//! Slide-down panel used for the account sheet.
//!
//! The sheet is always mounted; `open_top_sheet` / `close_top_sheet` toggle
//! the `show` class that the stylesheet animates.

use yew::prelude::*;

const SHOW_CLASS: &str = "show";

pub struct TopSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    pub title: String,
    pub on_close: Callback<MouseEvent>,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        TopSheet
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="top-sheet" ref={props.node_ref.clone()}>
                <div class="top-sheet-header">
                    <h2>{ props.title.clone() }</h2>
                    <button class="icon-btn" title="Close" onclick={props.on_close.clone()}>
                        { "✕" }
                    </button>
                </div>
                { props.children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        sheet.class_list().add_1(SHOW_CLASS).ok();
    }
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        sheet.class_list().remove_1(SHOW_CLASS).ok();
    }
}
