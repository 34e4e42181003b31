pub mod app_routes;
