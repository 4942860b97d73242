//! BookHotel client
//!
//! Command line entry point

use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use BookHotel::{
    config::Settings,
    handlers::{
        bookings::render_booking, ChangePasswordModal, HotelBookingFormController,
        HotelBookingListingController, HotelCreateFormController, HotelListingController,
        HotelViewController, LoginController,
    },
    services::ServiceFactory,
    state::{Navigator, Screen, SessionContext, SessionStorage},
    utils::logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Client for the BookHotel booking service")]
struct Cli {
    /// Configuration file (defaults to ./bookhotel.toml when present)
    #[arg(long, global = true, env = "BOOKHOTEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        realname: String,
        #[arg(long, env = "BOOKHOTEL_PASSWORD")]
        password: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "BOOKHOTEL_PASSWORD")]
        password: String,
    },
    /// End the session
    Logout,
    /// Fetch the token of the server session
    Token,
    /// List hotels
    Hotels,
    /// Show a hotel with its map
    Hotel { id: i64 },
    /// Preview a booking, and post it with --confirm
    Book(BookArgs),
    /// List your bookings
    Bookings,
    /// Show one of your bookings
    Booking { id: i64 },
    /// Cancel a booking
    Cancel { id: i64 },
    /// Change your password
    ChangePassword {
        #[arg(long, env = "BOOKHOTEL_NEW_PASSWORD")]
        password: String,
    },
    /// Create a hotel (administrators only)
    CreateHotel(CreateHotelArgs),
    /// Show which screen a path resolves to
    Route { path: String },
}

#[derive(Args, Debug)]
struct BookArgs {
    hotel_id: i64,
    #[arg(long)]
    check_in: String,
    #[arg(long)]
    check_out: String,
    /// Number of rooms, 1 to 3
    #[arg(long, default_value = "1")]
    rooms: String,
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    card_name: String,
    /// Card expiry as YYYY-MM-DD
    #[arg(long)]
    card_expiry: String,
    #[arg(long)]
    no_smoking: bool,
    /// Override the user id read from the session token
    #[arg(long)]
    user_id: Option<i64>,
    /// Post the booking after the preview
    #[arg(long)]
    confirm: bool,
}

#[derive(Args, Debug)]
struct CreateHotelArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    zipcode: String,
    #[arg(long)]
    nightly_rate: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;
    info!("Starting {}", BookHotel::info());

    let services = ServiceFactory::new(settings.clone())?;
    let storage = SessionStorage::new(&settings.session);
    let mut session = restore_session(&services, &storage).await?;
    let mut navigator = Navigator::new();

    let ok = run(cli.command, &services, &storage, &mut session, &mut navigator).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Reuse the saved session when it belongs to the configured server
async fn restore_session(services: &ServiceFactory, storage: &SessionStorage) -> anyhow::Result<SessionContext> {
    let base_url = services.settings.api.base_url.clone();

    match storage.load_context().await? {
        Some(context) if context.matches_server(&base_url) => {
            if let Some(token) = &context.token {
                services.api.set_token(token.clone()).await;
            }
            if let Some(cookies) = &context.cookies {
                services.api.restore_cookies(cookies);
            }
            debug!(authenticated = context.is_authenticated(), "Restored session");
            Ok(context)
        }
        Some(_) => {
            warn!("Saved session belongs to another server, ignoring it");
            Ok(SessionContext::new(base_url))
        }
        None => Ok(SessionContext::new(base_url)),
    }
}

/// Navigate to a screen; false when the session cannot show it
fn enter(services: &ServiceFactory, navigator: &mut Navigator, session: &SessionContext, screen: Screen) -> bool {
    if screen.requires_admin() && !services.settings.features.admin_panel {
        eprintln!("The admin panel is disabled in this configuration.");
        return false;
    }
    let landed = navigator.navigate(screen, session);
    if landed != screen {
        eprintln!("Not logged in. Run `login` or `signup` first.");
        return false;
    }
    true
}

async fn run(
    command: Commands,
    services: &ServiceFactory,
    storage: &SessionStorage,
    session: &mut SessionContext,
    navigator: &mut Navigator,
) -> anyhow::Result<bool> {
    let api = services.api.clone();

    match command {
        Commands::Signup { username, realname, password } => {
            let mut login = LoginController::new(api.clone());
            login.toggle_form();
            let next = login.signup(&username, &realname, &password).await;
            println!("{}", login.render());
            if let (Some(next), Some(token)) = (next, login.token.clone()) {
                session.authenticate(token, Some(username));
                session.cookies = api.session_cookies();
                storage.save_context(session).await?;
                navigator.navigate(next, session);
                return Ok(true);
            }
            Ok(false)
        }
        Commands::Login { username, password } => {
            let mut login = LoginController::new(api.clone());
            let next = login.login(&username, &password).await;
            println!("{}", login.render());
            if let (Some(next), Some(token)) = (next, login.token.clone()) {
                session.authenticate(token, Some(username));
                session.cookies = api.session_cookies();
                storage.save_context(session).await?;
                navigator.navigate(next, session);
                return Ok(true);
            }
            Ok(false)
        }
        Commands::Logout => {
            if let Err(e) = api.logout().await {
                warn!(error = %e, "Server logout failed; forgetting the session anyway");
            }
            session.clear();
            storage.delete_context().await?;
            navigator.navigate(Screen::Logout, session);
            println!("Logged out.");
            Ok(true)
        }
        Commands::Token => match api.fetch_token().await {
            Ok(token) => {
                let username = session.username.clone();
                session.authenticate(token, username);
                session.cookies = api.session_cookies().or_else(|| session.cookies.take());
                storage.save_context(session).await?;
                match session.user_id() {
                    Some(id) => println!("Session token refreshed for user #{}.", id),
                    None => println!("Session token refreshed."),
                }
                Ok(true)
            }
            Err(e) => {
                eprintln!("Could not fetch token: {}", e.display_message());
                Ok(false)
            }
        },
        Commands::Hotels => {
            if !enter(services, navigator, session, Screen::Home) {
                return Ok(false);
            }
            let mut listing = HotelListingController::new(api);
            listing.load().await;
            println!("{}", listing.render());
            Ok(listing.error.is_none())
        }
        Commands::Hotel { id } => {
            if !enter(services, navigator, session, Screen::HotelDetail(id)) {
                return Ok(false);
            }
            let geocoder = services.map_enabled().then(|| services.geocoding.clone());
            let mut view = HotelViewController::new(
                api,
                geocoder,
                services.map_renderer.clone(),
                services.settings.map.clone(),
            );
            view.init(id).await;
            println!("{}", view.render());
            Ok(view.error.is_none())
        }
        Commands::Book(args) => {
            if !enter(services, navigator, session, Screen::BookHotel(args.hotel_id)) {
                return Ok(false);
            }
            let mut form = HotelBookingFormController::new(api);
            form.init(args.hotel_id, args.user_id).await;
            if form.hotel.is_none() {
                println!("{}", form.render());
                return Ok(false);
            }

            form.form_data.check_in = args.check_in;
            form.form_data.check_out = args.check_out;
            form.form_data.room_preference = args.rooms;
            form.form_data.smoking_preference = !args.no_smoking;
            form.form_data.credit_card_number = args.card_number;
            form.form_data.credit_card_name = args.card_name;
            form.form_data.credit_card_expiry = args.card_expiry;

            if !form.submit() || !args.confirm {
                println!("{}", form.render());
                if form.preview {
                    println!("Run again with --confirm to book.");
                }
                return Ok(form.preview);
            }

            let next = form.post_booking().await;
            println!("{}", form.render());
            if let Some(next) = next {
                navigator.navigate(next, session);
                return Ok(true);
            }
            Ok(false)
        }
        Commands::Bookings => {
            if !enter(services, navigator, session, Screen::Bookings) {
                return Ok(false);
            }
            let mut listing = HotelBookingListingController::new(api);
            listing.load().await;
            println!("{}", listing.render());
            Ok(listing.error.is_none())
        }
        Commands::Booking { id } => {
            if !enter(services, navigator, session, Screen::BookingDetail(id)) {
                return Ok(false);
            }
            let mut listing = HotelBookingListingController::new(api);
            listing.load().await;
            if let Some(error) = &listing.error {
                eprintln!("Could not load bookings: {}", error);
                return Ok(false);
            }
            match listing.find(id) {
                Some(booking) => {
                    println!("{}", render_booking(booking));
                    Ok(true)
                }
                None => {
                    eprintln!("No booking #{} found.", id);
                    Ok(false)
                }
            }
        }
        Commands::Cancel { id } => {
            if !enter(services, navigator, session, Screen::Bookings) {
                return Ok(false);
            }
            let mut listing = HotelBookingListingController::new(api);
            listing.load().await;
            let cancelled = listing.cancel_booking(id).await;
            if cancelled {
                println!("Booking #{} cancelled.", id);
            }
            println!("{}", listing.render());
            Ok(cancelled)
        }
        Commands::ChangePassword { password } => {
            if !enter(services, navigator, session, Screen::Home) {
                return Ok(false);
            }
            let mut modal = ChangePasswordModal::new(api);
            modal.open();
            let changed = modal.ok(true, &password).await;
            println!("{}", modal.render());
            Ok(changed)
        }
        Commands::CreateHotel(args) => {
            if !enter(services, navigator, session, Screen::CreateHotel) {
                return Ok(false);
            }
            let mut form = HotelCreateFormController::new(api);
            form.init().await;
            form.form_data.name = args.name;
            form.form_data.description = args.description;
            form.form_data.address = args.address;
            form.form_data.city = args.city;
            form.form_data.state = args.state;
            form.form_data.country = args.country;
            form.form_data.zipcode = args.zipcode;
            form.form_data.nightly_rate = args.nightly_rate;

            let next = form.hotel_create().await;
            println!("{}", form.render());
            if let Some(next) = next {
                navigator.navigate(next, session);
                return Ok(true);
            }
            Ok(false)
        }
        Commands::Route { path } => {
            let screen = Screen::from_path(&path)?;
            let landed = navigator.navigate(screen, session);
            if landed == screen {
                println!("{}", screen);
            } else {
                println!("{} -> redirected to {}", screen, landed);
            }
            Ok(true)
        }
    }
}
