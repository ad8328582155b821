mod widgets;
mod controllers;
mod constants;
mod config;
mod error;
mod models;
mod repository;
mod resolver;
mod application;
mod audit;
mod prelude;
mod ui;

fn main() -> anyhow::Result<()> {
    application::Application::new().activate()
}
