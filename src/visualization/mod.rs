pub mod renderer;
pub mod plsim_vis2d;
