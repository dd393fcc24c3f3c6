use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    movie_insights::example_apps::run_dashboard_report(std::env::args().skip(1))
}
