use clap::{Args, Parser, Subcommand};
use doclist_core::constants::SPECIALTY_SEPARATOR;
use doclist_core::{
    query, ConsultationMode, CoreConfig, DirectoryFetcher, DoctorRecord, FilterSpecification,
    ListingPage, SortDirection,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "doclist")]
#[command(about = "Doctor directory search CLI")]
struct Cli {
    /// Directory endpoint (defaults to DOCLIST_SOURCE_URL, then the mock endpoint)
    #[arg(long, global = true, env = "DOCLIST_SOURCE_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors matching the filters
    List(FilterArgs),
    /// Print the canonical query string for the filters
    Url(FilterArgs),
    /// List the distinct specialties in the directory
    Specialties,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Start from a shared query string, e.g. `feesSort=asc&search=priya`
    #[arg(long)]
    query: Option<String>,
    /// `Video Consult` or `In Clinic`
    #[arg(long)]
    consultation_type: Option<ConsultationMode>,
    /// Specialty to include (repeatable, or comma-separated)
    #[arg(long = "specialty")]
    specialties: Vec<String>,
    /// `asc` or `desc`
    #[arg(long)]
    fees_sort: Option<SortDirection>,
    /// `asc` or `desc`
    #[arg(long)]
    experience_sort: Option<SortDirection>,
    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    /// Flags override whatever the `--query` string set.
    fn specification(&self) -> FilterSpecification {
        let mut spec = query::decode(self.query.as_deref().unwrap_or_default());

        if self.consultation_type.is_some() {
            spec = spec.with_consultation_type(self.consultation_type);
        }
        if self.fees_sort.is_some() {
            spec = spec.with_fees_sort(self.fees_sort);
        }
        if self.experience_sort.is_some() {
            spec = spec.with_experience_sort(self.experience_sort);
        }
        if let Some(search) = &self.search {
            spec = spec.with_search_query(search.as_str());
        }
        for specialty in self.specialties.iter().flat_map(|s| s.split(SPECIALTY_SEPARATOR)) {
            let specialty = specialty.trim();
            if !specialty.is_empty() && !spec.specialties.contains(specialty) {
                spec = spec.toggle_specialty(specialty);
            }
        }
        spec
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("doclist=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List(filters)) => {
            let records = fetch(cli.source).await?;
            let page = ListingPage::new(&records, false, filters.specification());
            if page.view().is_empty() {
                println!("No doctors found matching your criteria.");
            } else {
                for doctor in page.view() {
                    println!("{}", card(doctor));
                }
                println!("Showing {} of {} doctors.", page.view().len(), records.len());
            }
        }
        Some(Commands::Url(filters)) => {
            println!("{}", query::encode(&filters.specification()));
        }
        Some(Commands::Specialties) => {
            let records = fetch(cli.source).await?;
            for specialty in doclist_core::facets::specialty_facets(&records) {
                println!("{}", specialty);
            }
        }
        None => {
            println!("Use 'doclist --help' for usage information");
        }
    }

    Ok(())
}

/// Fetch the directory once. Unlike the server, a failed fetch is fatal here.
async fn fetch(source: Option<String>) -> anyhow::Result<Vec<DoctorRecord>> {
    let cfg = CoreConfig::from_env_values(
        source,
        std::env::var("DOCLIST_FETCH_TIMEOUT_SECS").ok(),
    )?;
    let fetcher = DirectoryFetcher::new(&cfg)?;
    tracing::info!("fetching doctors from {}", fetcher.source_url());
    Ok(fetcher.fetch().await?)
}

fn card(doctor: &DoctorRecord) -> String {
    let modes: Vec<&str> = ConsultationMode::ALL
        .into_iter()
        .filter(|mode| doctor.supports(*mode))
        .map(ConsultationMode::label)
        .collect();

    format!(
        "{}\n  Specialties: {}\n  Languages: {}\n  Experience: {}\n  Fee: {}\n  Consultation: {}\n",
        doctor.name,
        doctor.specialities.join(", "),
        doctor.languages.join(", "),
        doctor.experience,
        doctor.fees,
        modes.join(", "),
    )
}
