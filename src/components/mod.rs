pub mod controls_bar;
pub mod json_input;
pub mod tree_canvas;
pub mod tree_visualizer;
