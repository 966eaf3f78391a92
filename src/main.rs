use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kos_scout::api::UploadFile;
use kos_scout::models::{
    BookingDecision, BookingFilterParams, BookingStatus, Gender, KosCreateRequest, KosUpdateRequest,
    LoginRequest, ProfileUpdateRequest, RegisterRequest, ReviewRequest, Role,
};
use kos_scout::pages::{self, BoardingEntry, Guard, MockBoardingHouseBook};
use kos_scout::store::{
    BookingsStore, FacilitiesStore, ImagesStore, KosDetailStore, KosListStore, OwnerBookingsStore,
    OwnerKosStore, ProfileStore, ReviewsStore,
};
use kos_scout::{ApiClient, ApiConfig, AuthContext, FileStore, Route, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kos-scout", version, about = "Boarding-house rental marketplace client")]
struct Cli {
    /// API root, e.g. https://learn.smktelkom-mlg.sch.id/kos/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Tenant identifier sent as the MakerID header
    #[arg(long, global = true)]
    maker_id: Option<String>,

    /// Where the token and user are kept between runs
    #[arg(long, global = true, env = "KOS_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        name: String,
        email: String,
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "society")]
        role: Role,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Renter dashboard: browse listings
    Dashboard {
        #[arg(long)]
        search: Option<String>,
    },
    /// Listing detail with reviews
    Detail { id: u64 },
    /// Book a stay
    Book {
        kos_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Your bookings
    Bookings {
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Booking receipt
    Receipt { id: u64 },
    /// Reviews of a listing
    #[command(subcommand)]
    Review(ReviewCommand),
    /// Order tracking (sample order)
    OrderTrack,
    /// Owner dashboard
    AdminDashboard,
    /// Owner listing, facility, image, review and booking management
    #[command(subcommand)]
    Owner(OwnerCommand),
    /// Show or update your profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// App maker registration
    #[command(subcommand)]
    Maker(MakerCommand),
    /// Boarding-house management on mock data (not saved)
    BoardingHouse {
        #[arg(long, default_value = "")]
        search: String,
        /// Add an entry with this name
        #[arg(long)]
        add: Option<String>,
        #[arg(long, default_value = "Jalan Sawojajar, Kota Malang")]
        address: String,
        #[arg(long, default_value = "500k/month")]
        price: String,
        /// Select an entry by id
        #[arg(long)]
        select: Option<u64>,
        /// Delete the selected entry
        #[arg(long)]
        delete: bool,
    },
    /// Boarding-house overview table (sample data)
    BoardingHouseDashboard {
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand)]
enum ReviewCommand {
    List { kos_id: u64 },
    Add { kos_id: u64, text: String },
    Delete { kos_id: u64, id: u64 },
}

#[derive(Subcommand)]
enum OwnerCommand {
    Listings {
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: u64,
    },
    Create {
        name: String,
        address: String,
        price: i64,
        #[arg(long, default_value = "all")]
        gender: Gender,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        gender: Option<Gender>,
    },
    Delete {
        id: u64,
    },
    Facilities {
        kos_id: u64,
    },
    AddFacility {
        kos_id: u64,
        name: String,
    },
    RenameFacility {
        kos_id: u64,
        id: u64,
        name: String,
    },
    DeleteFacility {
        kos_id: u64,
        id: u64,
    },
    Facility {
        id: u64,
    },
    Images {
        kos_id: u64,
    },
    Upload {
        kos_id: u64,
        path: PathBuf,
    },
    ReplaceImage {
        kos_id: u64,
        id: u64,
        path: PathBuf,
    },
    DeleteImage {
        kos_id: u64,
        id: u64,
    },
    Image {
        id: u64,
    },
    Reviews {
        kos_id: u64,
    },
    Reply {
        kos_id: u64,
        text: String,
    },
    Bookings {
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Decide {
        id: u64,
        decision: BookingDecision,
    },
}

#[derive(Subcommand)]
enum MakerCommand {
    Register { name: String, school_class: String },
    Show,
}

fn require(guard: Guard, what: &str) -> Result<()> {
    match guard {
        Guard::Allow => Ok(()),
        Guard::Redirect(route) => bail!("{} requires another account (redirecting to {})", what, route),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(maker_id) = cli.maker_id {
        config = config.with_maker_id(maker_id);
    }

    let session_path = cli.session_file.unwrap_or_else(FileStore::default_path);
    let session = Session::new(Arc::new(FileStore::new(session_path)));
    let client = ApiClient::new(config, session).context("Failed to create API client")?;
    let mut auth = AuthContext::new(client.clone());

    match cli.command {
        Command::Login { email, password } => {
            let route = auth.login(&LoginRequest { email, password }).await?;
            println!("Signed in. Next: {}", route);
        }
        Command::Register {
            name,
            email,
            phone,
            password,
            role,
        } => {
            let route = auth
                .register(&RegisterRequest {
                    name,
                    email,
                    phone,
                    password,
                    role,
                })
                .await?;
            println!("Registered. Next: {}", route);
        }
        Command::Logout => {
            let route = auth.logout()?;
            println!("Signed out. Next: {}", route);
        }
        Command::Whoami => println!("{}", pages::render_profile(auth.user())),
        Command::Dashboard { search } => {
            require(pages::guard_society(&auth), "The dashboard")?;
            let mut store = KosListStore::new(client.clone(), search.as_deref());
            store.refetch().await;
            println!("{}", pages::render_dashboard(auth.user(), &store));
        }
        Command::Detail { id } => {
            let mut detail = KosDetailStore::new(client.clone(), id);
            let mut reviews = ReviewsStore::new(client.clone(), id);
            detail.refetch().await;
            reviews.refetch().await;
            println!("{}", pages::render_detail(&detail, &reviews));
        }
        Command::Book { kos_id, start, end } => {
            require(pages::guard_society(&auth), "Booking")?;
            if end <= start {
                bail!("End date {} must be after start date {}", end, start);
            }
            let mut store = BookingsStore::new(client.clone(), None);
            let message = store.create_booking(kos_id, start, end).await?;
            println!("{}", message);
            println!("{}", pages::render_bookings(store.bookings()));
        }
        Command::Bookings { status } => {
            require(pages::guard_society(&auth), "Bookings")?;
            let mut store = BookingsStore::new(client.clone(), status);
            store.refetch().await;
            print_or_fail(store.state().error.as_deref(), || pages::render_bookings(store.bookings()))?;
        }
        Command::Receipt { id } => {
            require(pages::guard_society(&auth), "Receipts")?;
            let booking = client.society().print_receipt(id).await?.into_data()?;
            println!("{}", pages::render_bookings(std::slice::from_ref(&booking)));
        }
        Command::Review(command) => run_review(&client, command).await?,
        Command::OrderTrack => println!("{}", pages::render_order_track()),
        Command::AdminDashboard => {
            require(pages::guard_owner(&auth), "The admin dashboard")?;
            println!("{}", pages::render_sidebar(Route::AdminDashboard));
            println!();
            println!("{}", pages::render_admin_dashboard(auth.user()));
        }
        Command::Owner(command) => {
            require(pages::guard_owner(&auth), "Owner management")?;
            run_owner(&client, auth.user().map(|user| user.id), command).await?;
        }
        Command::Profile { name, email, phone } => {
            let request = ProfileUpdateRequest { name, email, phone };
            let mut store = ProfileStore::new(client.clone());
            if !request.is_empty() {
                let message = store.update(&request).await?;
                println!("{}", message);
            }
            if auth.is_owner() {
                println!("{}", pages::render_sidebar(Route::ProfileOwner));
                println!();
            }
            println!("{}", pages::render_profile(store.user()));
        }
        Command::Maker(MakerCommand::Register { name, school_class }) => {
            let maker = client
                .maker()
                .register(&kos_scout::models::AppMakerRequest { name, school_class })
                .await?
                .into_data()?;
            println!("Maker #{} {} ({})", maker.id, maker.name, maker.school_class);
        }
        Command::Maker(MakerCommand::Show) => {
            let maker = client.maker().get().await?.into_data()?;
            println!("Maker #{} {} ({})", maker.id, maker.name, maker.school_class);
        }
        Command::BoardingHouse {
            search,
            add,
            address,
            price,
            select,
            delete,
        } => {
            let mut book = MockBoardingHouseBook::new();
            if let Some(id) = select {
                book.select(id);
            }
            if delete {
                match book.delete_selected() {
                    Some(entry) => info!("Removed mock entry #{} {}", entry.id, entry.name),
                    None => bail!("Nothing selected to delete"),
                }
            }
            if let Some(name) = add {
                book.add(BoardingEntry::draft(name, address, price));
            }
            println!("{}", pages::render_sidebar(Route::BoardingHouse));
            println!();
            println!("{}", book.render(&search));
        }
        Command::BoardingHouseDashboard { search } => {
            println!("{}", pages::render_boarding_house_dashboard(&search));
        }
    }

    Ok(())
}

fn print_or_fail(error: Option<&str>, render: impl FnOnce() -> String) -> Result<()> {
    match error {
        Some(error) => bail!("{}", error),
        None => {
            println!("{}", render());
            Ok(())
        }
    }
}

async fn run_review(client: &ApiClient, command: ReviewCommand) -> Result<()> {
    match command {
        ReviewCommand::List { kos_id } => {
            let mut store = ReviewsStore::new(client.clone(), kos_id);
            store.refetch().await;
            print_or_fail(store.state().error.as_deref(), || {
                store
                    .reviews()
                    .iter()
                    .map(|review| format!("#{} user {}: {}", review.id, review.user_id, review.review))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        ReviewCommand::Add { kos_id, text } => {
            let mut store = ReviewsStore::new(client.clone(), kos_id);
            println!("{}", store.add_review(&text).await?);
        }
        ReviewCommand::Delete { kos_id, id } => {
            let mut store = ReviewsStore::new(client.clone(), kos_id);
            println!("{}", store.delete_review(id).await?);
        }
    }
    Ok(())
}

async fn run_owner(client: &ApiClient, owner_id: Option<u64>, command: OwnerCommand) -> Result<()> {
    match command {
        OwnerCommand::Listings { search } => {
            let mut store = OwnerKosStore::new(client.clone(), search.as_deref());
            store.refetch().await;
            println!("{}", pages::render_owner_listings(&store));
        }
        OwnerCommand::Show { id } => {
            let kos = client.owner().kos_detail(id).await?.into_data()?;
            let kos = kos_scout::api::normalize::normalize_kos(kos, &client.config().storage_url);
            println!("{}", serde_json::to_string_pretty(&kos)?);
        }
        OwnerCommand::Create {
            name,
            address,
            price,
            gender,
        } => {
            let user_id = owner_id.context("No signed-in owner")?;
            let mut store = OwnerKosStore::new(client.clone(), None);
            let message = store
                .create_kos(&KosCreateRequest {
                    user_id,
                    name,
                    address,
                    price_per_month: price,
                    gender,
                })
                .await?;
            println!("{}", message);
            println!("{}", pages::render_owner_listings(&store));
        }
        OwnerCommand::Update {
            id,
            name,
            address,
            price,
            gender,
        } => {
            let mut store = OwnerKosStore::new(client.clone(), None);
            let request = KosUpdateRequest {
                user_id: None,
                name,
                address,
                price_per_month: price,
                gender,
            };
            println!("{}", store.update_kos(id, &request).await?);
            println!("{}", pages::render_owner_listings(&store));
        }
        OwnerCommand::Delete { id } => {
            let mut store = OwnerKosStore::new(client.clone(), None);
            println!("{}", store.delete_kos(id).await?);
            println!("{}", pages::render_owner_listings(&store));
        }
        OwnerCommand::Facilities { kos_id } => {
            let mut store = FacilitiesStore::new(client.clone(), kos_id);
            store.refetch().await;
            print_or_fail(store.state().error.as_deref(), || facility_lines(&store))?;
        }
        OwnerCommand::AddFacility { kos_id, name } => {
            let mut store = FacilitiesStore::new(client.clone(), kos_id);
            println!("{}", store.add(&name).await?);
            println!("{}", facility_lines(&store));
        }
        OwnerCommand::RenameFacility { kos_id, id, name } => {
            let mut store = FacilitiesStore::new(client.clone(), kos_id);
            println!("{}", store.update(id, &name).await?);
            println!("{}", facility_lines(&store));
        }
        OwnerCommand::DeleteFacility { kos_id, id } => {
            let mut store = FacilitiesStore::new(client.clone(), kos_id);
            println!("{}", store.delete(id).await?);
            println!("{}", facility_lines(&store));
        }
        OwnerCommand::Facility { id } => {
            let facility = client.owner().facility_detail(id).await?.into_data()?;
            println!("#{} {} (listing {})", facility.id, facility.facility_name, facility.kos_id);
        }
        OwnerCommand::Images { kos_id } => {
            let mut store = ImagesStore::new(client.clone(), kos_id);
            store.refetch().await;
            print_or_fail(store.state().error.as_deref(), || image_lines(&store))?;
        }
        OwnerCommand::Upload { kos_id, path } => {
            let upload = UploadFile::from_path(&path).await?;
            let mut store = ImagesStore::new(client.clone(), kos_id);
            println!("{}", store.upload(upload).await?);
            println!("{}", image_lines(&store));
        }
        OwnerCommand::ReplaceImage { kos_id, id, path } => {
            let upload = UploadFile::from_path(&path).await?;
            let mut store = ImagesStore::new(client.clone(), kos_id);
            println!("{}", store.replace(id, upload).await?);
            println!("{}", image_lines(&store));
        }
        OwnerCommand::DeleteImage { kos_id, id } => {
            let mut store = ImagesStore::new(client.clone(), kos_id);
            println!("{}", store.delete(id).await?);
            println!("{}", image_lines(&store));
        }
        OwnerCommand::Image { id } => {
            let image = client.owner().image_detail(id).await?.into_data()?;
            let url = image
                .file
                .as_deref()
                .map(|file| kos_scout::api::normalize::image_url(&client.config().storage_url, file));
            println!("#{} {} (listing {})", image.id, url.as_deref().unwrap_or("-"), image.kos_id);
        }
        OwnerCommand::Reviews { kos_id } => {
            let reviews = client.owner().list_reviews(kos_id).await?.into_data()?;
            for review in reviews {
                println!("#{} user {}: {}", review.id, review.user_id, review.review);
            }
        }
        OwnerCommand::Reply { kos_id, text } => {
            let message = client
                .owner()
                .create_review(kos_id, &ReviewRequest { review: text })
                .await?
                .into_message();
            println!("{}", message);
        }
        OwnerCommand::Bookings { status, date } => {
            let mut store = OwnerBookingsStore::new(client.clone(), BookingFilterParams { status, tgl: date });
            store.refetch().await;
            print_or_fail(store.state().error.as_deref(), || pages::render_bookings(store.bookings()))?;
        }
        OwnerCommand::Decide { id, decision } => {
            let mut store = OwnerBookingsStore::new(client.clone(), BookingFilterParams::default());
            println!("{}", store.update_status(id, decision).await?);
            println!("{}", pages::render_bookings(store.bookings()));
        }
    }
    Ok(())
}

fn facility_lines(store: &FacilitiesStore) -> String {
    store
        .facilities()
        .iter()
        .map(|facility| format!("#{} {}", facility.id, facility.facility_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn image_lines(store: &ImagesStore) -> String {
    store
        .images()
        .iter()
        .map(|image| {
            format!(
                "#{} {}",
                image.id,
                image.image_url.as_deref().or(image.file.as_deref()).unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
