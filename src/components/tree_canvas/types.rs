/// Camera instruction sent to the canvas by its owner.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
	/// Zoom in around the canvas centre.
	ZoomIn,
	/// Zoom out around the canvas centre.
	ZoomOut,
	/// Fit the whole tree into view.
	FitView,
	/// Centre the node with this id.
	Focus(String),
}
