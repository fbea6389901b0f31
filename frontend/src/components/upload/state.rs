//! Runtime state of the upload panel.

use common::model::file_info::FileInfo;
use common::workflow::upload::ColumnSelection;
use web_sys::File;
use yew::NodeRef;

pub struct UploadComponent {
    /// The accepted file, kept to be sent again with the analysis request.
    pub file: Option<File>,

    /// What the backend reported about the accepted file.
    pub file_info: Option<FileInfo>,

    pub selection: Option<ColumnSelection>,

    pub poly_degree: u32,

    pub uploading: bool,

    pub analyzing: bool,

    /// A file is being dragged over the drop zone.
    pub dragging: bool,

    /// Hidden `<input type="file">` opened by the drop zone.
    pub file_input_ref: NodeRef,
}

impl UploadComponent {
    pub fn new() -> Self {
        Self {
            file: None,
            file_info: None,
            selection: None,
            poly_degree: 1,
            uploading: false,
            analyzing: false,
            dragging: false,
            file_input_ref: NodeRef::default(),
        }
    }

    pub fn busy(&self) -> bool {
        self.uploading || self.analyzing
    }
}
