use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use shared::error::{AppError, AppResult};
use shared::models::{Identity, RestaurantId, SearchFilters};
use table_master::checkout::payment_failed_notice;
use table_master::{
    App, CheckoutEntry, Config, Notice, Outcome, OutcomePage, PageActions, PageLifetime, PageLoad,
    PayOutcome, load_restaurant, logger,
};

#[derive(Parser, Debug)]
#[command(name = "table-master", author, version, about = "Find a table and book it")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search restaurants
    Search {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        party_size: Option<u32>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    /// Show a restaurant and its open dates
    Show { id: String },
    /// Pick a date and time and keep it as the pending booking
    Book {
        id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Join the waitlist of a fully booked restaurant
    Waitlist {
        id: String,
        #[arg(long)]
        email: String,
    },
    /// Pay for the pending booking
    Checkout {
        id: String,
        /// Guest email; ignored when signed in
        #[arg(long)]
        email: Option<String>,
    },
    /// Handle the URL the payment page returned to
    Outcome { url: String },
    /// Sign in with email and password, or print an OAuth link
    Login {
        #[arg(long, required_unless_present = "provider")]
        email: Option<String>,
        #[arg(long, env = "TABLE_MASTER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long, conflicts_with = "email")]
        provider: Option<String>,
        /// Return to this restaurant's checkout after OAuth sign-in
        #[arg(long, requires = "provider")]
        checkout: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TABLE_MASTER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    /// Show the current identity and pending booking
    Whoami,
    /// List your bookings
    Bookings {
        /// Defaults to the signed-in email
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    logger::init_logger(
        &config.log_level,
        config.log_json,
        Some(config.log_dir().as_path()),
    )?;
    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let app = App::from_config(config)?;
    if let Err(notice) = run(&app, cli.command).await {
        eprintln!("{notice}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(app: &App, command: Command) -> Result<(), Notice> {
    match command {
        Command::Search {
            location,
            party_size,
            date,
            time,
        } => {
            let filters = SearchFilters {
                location,
                party_size,
                date,
                time,
            };
            let restaurants = app
                .directory()
                .search_restaurants(&filters)
                .await
                .map_err(|e| Notice::from(AppError::from(e)))?;
            if restaurants.is_empty() {
                println!("No restaurants found.");
            }
            for r in restaurants {
                println!(
                    "{:>6}  {}  {}  {:.1}★  {}",
                    r.id, r.name, r.cuisine, r.rating, r.price_range
                );
            }
        }

        Command::Show { id } => {
            let page = PageLifetime::new();
            let selector = match load_page(app, &id, &page).await? {
                Some(selector) => selector,
                None => return Ok(()),
            };
            let r = selector.restaurant();
            println!("{} ({})", r.name, r.price_range);
            if r.michelin {
                println!("Michelin listed");
            }
            if !r.address.is_empty() {
                println!("{}", r.address);
            }
            if !r.description.is_empty() {
                println!("\n{}\n", r.description);
            }
            match selector.actions() {
                PageActions::Book => {
                    for date in selector.available_dates() {
                        let slots: Vec<String> = date
                            .time_slots
                            .iter()
                            .map(|s| format!("{} (${})", s.time, s.price))
                            .collect();
                        println!("{}: {}", date.date, slots.join(", "));
                    }
                }
                PageActions::WaitlistOnly => {
                    println!("No slots available currently. Join the waitlist:");
                    println!("  table-master waitlist {id} --email <you@example.com>");
                }
            }
        }

        Command::Book { id, date, time } => {
            let page = PageLifetime::new();
            let Some(mut selector) = load_page(app, &id, &page).await? else {
                return Ok(());
            };
            selector.choose_date(&date).map_err(Notice::from)?;
            selector.choose_slot(&time).map_err(Notice::from)?;
            let intent = selector
                .confirm_and_save(app.pending_bookings(), chrono::Utc::now())
                .map_err(Notice::from)?;
            println!(
                "{}",
                Notice::success(
                    "Reservation held",
                    format!(
                        "{} on {} at {} (${}). Continue with: table-master checkout {}",
                        intent.restaurant_name(),
                        intent.selected_date(),
                        intent.selected_slot(),
                        intent.selected_time_slot_price(),
                        id
                    ),
                )
            );
        }

        Command::Waitlist { id, email } => {
            let signup = app.waitlist(RestaurantId::new(id));
            let notice = signup.submit(&email).await.map_err(Notice::from)?;
            println!("{notice}");
        }

        Command::Checkout { id, email } => {
            let handoff = match app.checkout(&RestaurantId::new(&id)) {
                CheckoutEntry::Ready(handoff) => handoff,
                CheckoutEntry::MakeReservationFirst {
                    restaurant_id,
                    reason,
                } => {
                    return Err(Notice::info(
                        reason.message,
                        format!("Pick a date and time: table-master show {restaurant_id}"),
                    ));
                }
            };

            let intent = handoff.intent();
            println!(
                "{} on {} at {}: ${}",
                intent.restaurant_name(),
                intent.selected_date(),
                intent.selected_slot(),
                intent.selected_time_slot_price()
            );

            let email = match email {
                Some(email) => Some(email),
                None if handoff.needs_email_input() => {
                    Some(prompt_email(handoff.suggested_email().as_deref()).map_err(Notice::from)?)
                }
                None => None,
            };

            match handoff.pay(email.as_deref()).await {
                Ok(PayOutcome::Redirect(redirect)) => {
                    println!("Continue to payment: {}", redirect.url);
                }
                Ok(PayOutcome::Suppressed) | Ok(PayOutcome::Abandoned) => {}
                Err(e) => return Err(payment_failed_notice(&e)),
            }
        }

        Command::Outcome { url } => {
            let outcome = Outcome::from_return_url(&url).map_err(Notice::from)?;
            let view = OutcomePage::enter(outcome, app.pending_bookings());
            println!("{}\n{}", view.title, view.message);
            if let Some(hint) = view.hint {
                println!("{hint}");
            }
            if let Some(session_id) = view.session_id {
                println!("Reference: {session_id}");
            }
        }

        Command::Login {
            email,
            password,
            provider,
            checkout,
        } => {
            let auth = app.auth();
            if let Some(provider) = provider {
                let url = match checkout {
                    Some(id) => auth.oauth_url_for_checkout(&provider, &RestaurantId::new(id)),
                    None => auth.oauth_url(&provider),
                }
                .map_err(Notice::from)?;
                println!("Open this link to sign in: {url}");
                return Ok(());
            }
            let user = auth
                .sign_in(
                    email.as_deref().unwrap_or_default(),
                    password.as_deref().unwrap_or_default(),
                )
                .await
                .map_err(Notice::from)?;
            println!("{}", Notice::success("Signed in", format!("Welcome back, {}!", user.display_name)));
        }

        Command::Signup {
            email,
            password,
            name,
        } => {
            let notice = app
                .auth()
                .sign_up(&email, &password, &name)
                .await
                .map_err(Notice::from)?;
            println!("{notice}");
        }

        Command::Logout => {
            app.auth().sign_out().await.map_err(Notice::from)?;
            println!("{}", Notice::success("", "Signed out"));
        }

        Command::Whoami => {
            match app.session().current() {
                Some(Identity::Authenticated { user, .. }) => {
                    println!("Signed in as {} <{}>", user.display_name, user.email)
                }
                Some(Identity::Guest { email }) => println!("Guest ({email})"),
                None => println!("Not signed in"),
            }
            if let Some(intent) = app.pending_bookings().load() {
                println!(
                    "Pending: {} on {} at {}",
                    intent.restaurant_name(),
                    intent.selected_date(),
                    intent.selected_slot()
                );
            }
        }

        Command::Bookings { email } => {
            let email = email
                .or_else(|| app.session().authenticated_email())
                .ok_or_else(|| {
                    Notice::info("Not signed in", "Sign in or pass --email to see bookings.")
                })?;
            let bookings = app
                .directory()
                .list_user_bookings(&email)
                .await
                .map_err(|e| Notice::from(AppError::from(e)))?;
            if bookings.is_empty() {
                println!("No bookings yet.");
            }
            for b in bookings {
                println!(
                    "{}  {} {}  [{}]",
                    b.restaurant_name, b.booking_date, b.booking_time, b.status
                );
            }
        }
    }
    Ok(())
}

/// Load a restaurant page; `None` once "not available" has been shown
async fn load_page(
    app: &App,
    id: &str,
    page: &PageLifetime,
) -> Result<Option<table_master::AvailabilitySelector>, Notice> {
    match load_restaurant(app.directory(), &RestaurantId::new(id), &page.token()).await {
        Ok(PageLoad::Loaded(selector)) => Ok(Some(selector)),
        Ok(PageLoad::NotAvailable(_)) => {
            println!(
                "{}",
                Notice::from(AppError::restaurant_not_found(id.to_string()))
            );
            Ok(None)
        }
        Ok(PageLoad::Abandoned) => Ok(None),
        Err(e) => Err(Notice::from(e)),
    }
}

/// Ask for the guest email, offering the remembered one
fn prompt_email(suggested: Option<&str>) -> AppResult<String> {
    let mut stdout = io::stdout();
    match suggested {
        Some(s) => write!(stdout, "Email [{s}]: ")?,
        None => write!(stdout, "Email: ")?,
    }
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let entered = line.trim();
    Ok(match (entered.is_empty(), suggested) {
        (true, Some(s)) => s.to_string(),
        _ => entered.to_string(),
    })
}
