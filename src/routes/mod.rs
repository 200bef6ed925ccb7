pub mod campaign_route;
pub mod default_route;
