use crate::api::ApiError;
use common::model::analysis::AnalysisResult;
use common::model::file_info::FileInfo;
use common::workflow::upload::Axis;
use web_sys::File;

pub enum Msg {
    OpenFileDialog,
    FilePicked(File),
    SetDragging(bool),
    Uploaded(File, FileInfo),
    UploadFailed(ApiError),
    Toggle(Axis, String),
    SelectAll(Axis),
    SelectRemaining(Axis),
    Clear(Axis),
    SetDegree(String),
    Analyze,
    AnalysisAborted,
    AnalysisFinished(Result<AnalysisResult, ApiError>),
    Reset,
}
