//! Result panel: the fitted functions with their accuracy and plots, a
//! prediction form driven by the embedded model and the PDF report export.

use common::config::BackendConfig;
use common::model::analysis::AnalysisResult;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ResultsComponent;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultsProps {
    pub result: AnalysisResult,
    /// Name of the analysed file, used for the report. `None` for manual entry.
    #[prop_or_default]
    pub filename: Option<String>,
    pub backend: BackendConfig,
    pub on_reset: Callback<()>,
}

impl Component for ResultsComponent {
    type Message = Msg;
    type Properties = ResultsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ResultsComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().result != old_props.result {
            *self = ResultsComponent::new();
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
