use camp_scheduler::display::{print_schedule, write_schedule_to_file};
use camp_scheduler::logging::init_logger;
use camp_scheduler::parser::{load_activity_definitions, load_camper_requests};
use camp_scheduler::scheduler::schedule_activities;
use camp_scheduler::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let verbose = std::env::args().any(|arg| arg == "--verbose");
    init_logger(verbose);
    let args: Vec<String> = std::env::args().filter(|arg| arg != "--verbose").collect();

    // Web mode serves the JSON API instead of running a batch schedule
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        println!("Starting web server on port {}...", port);
        println!("Access the API at http://localhost:{}", port);

        web::start_server(port, password).await?;
        return Ok(());
    }

    if args.len() < 3 {
        eprintln!("Usage: camp-scheduler <activities.csv> <campers.csv> [schedule.txt]");
        eprintln!("       camp-scheduler web [port]");
        std::process::exit(2);
    }

    println!("Loading activity definitions and camper requests...");
    let mut activities = load_activity_definitions(&args[1])?;
    let mut requests = load_camper_requests(&args[2], &activities)?;
    println!(
        "Loaded {} activities and {} camper requests",
        activities.len(),
        requests.len()
    );

    let unsatisfied = schedule_activities(&mut requests, &mut activities);
    print_schedule(&activities, &requests, &unsatisfied);

    if let Some(filename) = args.get(3) {
        write_schedule_to_file(&activities, filename)?;
        println!("\nSchedule saved to {}", filename);
    }

    Ok(())
}
