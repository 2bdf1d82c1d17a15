pub mod material_select;
pub mod model_badge;
pub mod site_nav;
