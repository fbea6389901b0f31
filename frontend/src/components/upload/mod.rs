//! File upload panel: pick or drop a dataset, let the analysis backend
//! describe it, choose input and output columns, then request a fit.
//!
//! The component is split the usual way: `state` holds the data, `update`
//! reacts to `Msg`, `view` renders.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

use super::InputPanelProps;
pub use messages::Msg;
pub use state::UploadComponent;

impl Component for UploadComponent {
    type Message = Msg;
    type Properties = InputPanelProps;

    fn create(_ctx: &Context<Self>) -> Self {
        UploadComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
