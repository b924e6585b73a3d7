use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinic_core::catalog::filter_doctors;
use clinic_core::config::{downstream_policy_from_env_value, LatencyRange};
use clinic_core::navigation::{default_navigation, visible_for};
use clinic_core::{
    BookingController, BookingRequest, BookingStep, BreadcrumbRegistry, CatalogKind,
    DownstreamPolicy, FixtureCatalog, PortalConfig, PortalRole, SelectOption, SlotWindow,
    StepOutcome, TimeSlot,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic portal booking workflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable times of day
    Slots,
    /// List catalog options
    Catalog {
        /// clinics, specialties or doctors
        kind: CatalogKind,
        /// Only doctors with this specialty value
        #[arg(long)]
        specialty: Option<String>,
        /// Only doctors at this clinic value
        #[arg(long)]
        clinic: Option<String>,
    },
    /// Walk a booking session through every step and print the submission payload
    Book {
        /// Clinic value, e.g. c1
        #[arg(long)]
        clinic: String,
        /// Specialty value, e.g. s1
        #[arg(long)]
        specialty: String,
        /// Doctor value, e.g. d1
        #[arg(long)]
        doctor: String,
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Appointment time (HH:MM)
        #[arg(long)]
        time: TimeSlot,
        /// Reason for the visit (optional)
        #[arg(long, default_value = "")]
        reason: String,
        /// Clear later choices when an earlier one changes (overrides CLINIC_CLEAR_DOWNSTREAM)
        #[arg(long)]
        clear_downstream: bool,
    },
    /// Print the breadcrumb trail for a path
    Breadcrumbs {
        /// Route path, e.g. /clinics/c1/edit
        path: String,
        /// Label override as PATH=LABEL (repeatable)
        #[arg(long = "label", value_parser = parse_label)]
        labels: Vec<(String, String)>,
    },
    /// Print the navigation visible to a role
    Nav {
        /// admin, clinic, doctor or patient
        role: PortalRole,
    },
}

fn parse_label(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(path, label)| (path.to_string(), label.to_string()))
        .ok_or_else(|| format!("expected PATH=LABEL, got '{input}'"))
}

fn lookup(
    catalog: &FixtureCatalog,
    kind: CatalogKind,
    step: BookingStep,
    value: &str,
) -> anyhow::Result<SelectOption> {
    catalog
        .find(kind, value)
        .ok_or_else(|| anyhow!("{step} step: unknown {kind} value '{value}'"))
}

/// Resolve the booking configuration from `CLINIC_CLEAR_DOWNSTREAM` and the command line flag.
///
/// The CLI never simulates latency, so only the downstream policy and slot window matter here.
fn booking_config(env_value: Option<String>, clear_flag: bool) -> anyhow::Result<PortalConfig> {
    let policy = if clear_flag {
        DownstreamPolicy::Clear
    } else {
        downstream_policy_from_env_value(env_value)?
    };
    Ok(PortalConfig::new(
        LatencyRange::disabled(),
        policy,
        SlotWindow::default(),
    ))
}

/// Start a booking session that follows the configured downstream policy.
fn session(cfg: &PortalConfig) -> BookingController {
    tracing::debug!(policy = ?cfg.downstream_policy(), "starting booking session");
    BookingController::with_policy(cfg.downstream_policy())
}

/// Drive a controller from the first step to the review step and return what it would submit.
#[allow(clippy::too_many_arguments)]
fn book(
    cfg: &PortalConfig,
    catalog: &FixtureCatalog,
    clinic: &str,
    specialty: &str,
    doctor: &str,
    date: NaiveDate,
    time: TimeSlot,
    reason: String,
) -> anyhow::Result<BookingRequest> {
    let clinic = lookup(catalog, CatalogKind::Clinics, BookingStep::Clinic, clinic)?;
    let specialty = lookup(catalog, CatalogKind::Specialties, BookingStep::Specialty, specialty)?;
    let doctor = filter_doctors(catalog.doctors(), Some(&specialty), Some(&clinic))
        .into_iter()
        .find(|d| d.value() == doctor)
        .ok_or_else(|| {
            anyhow!(
                "{} step: doctor '{doctor}' does not practise {} at {}",
                BookingStep::Doctor,
                specialty.label(),
                clinic.label()
            )
        })?;

    if !cfg.slot_window().contains(&time) {
        bail!("{} step: {time} is not an offered slot", BookingStep::DateTime);
    }

    let mut controller = session(cfg);
    controller.set_clinic(Some(clinic))?;
    advance(&mut controller)?;
    controller.set_specialty(Some(specialty))?;
    advance(&mut controller)?;
    controller.set_doctor(Some(doctor))?;
    advance(&mut controller)?;
    controller.set_date(Some(date))?;
    controller.set_time(Some(time))?;
    advance(&mut controller)?;
    controller.set_reason(reason)?;

    match controller.go_next()? {
        StepOutcome::SubmitRequested(request) => Ok(request),
        StepOutcome::Blocked { missing, .. } => bail!("{missing} step is incomplete"),
        StepOutcome::Advanced { to, .. } => bail!("expected the review step, reached {to}"),
    }
}

fn advance(controller: &mut BookingController) -> anyhow::Result<()> {
    match controller.go_next()? {
        StepOutcome::Advanced { from, to } => {
            tracing::debug!(%from, %to, "advanced");
            Ok(())
        }
        StepOutcome::Blocked { missing, .. } => bail!("{missing} step is incomplete"),
        StepOutcome::SubmitRequested(_) => bail!("reached review before every step was filled"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let catalog = FixtureCatalog::new().context("loading catalog fixtures")?;

    match cli.command {
        Some(Commands::Slots) => {
            for slot in SlotWindow::default().slots() {
                println!("{slot}");
            }
        }
        Some(Commands::Catalog {
            kind,
            specialty,
            clinic,
        }) => {
            let options = match kind {
                CatalogKind::Clinics => catalog.clinics().to_vec(),
                CatalogKind::Specialties => catalog.specialties().to_vec(),
                CatalogKind::Doctors => {
                    let specialty = specialty
                        .map(|s| {
                            lookup(&catalog, CatalogKind::Specialties, BookingStep::Specialty, &s)
                        })
                        .transpose()?;
                    let clinic = clinic
                        .map(|c| lookup(&catalog, CatalogKind::Clinics, BookingStep::Clinic, &c))
                        .transpose()?;
                    filter_doctors(catalog.doctors(), specialty.as_ref(), clinic.as_ref())
                }
            };
            if options.is_empty() {
                println!("No {kind} found.");
            }
            for option in options {
                println!("{}\t{}", option.value(), option.label());
            }
        }
        Some(Commands::Book {
            clinic,
            specialty,
            doctor,
            date,
            time,
            reason,
            clear_downstream,
        }) => {
            let cfg = booking_config(
                std::env::var("CLINIC_CLEAR_DOWNSTREAM").ok(),
                clear_downstream,
            )?;
            let request = book(
                &cfg, &catalog, &clinic, &specialty, &doctor, date, time, reason,
            )?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Some(Commands::Breadcrumbs { path, labels }) => {
            let registry = BreadcrumbRegistry::new();
            let _guards: Vec<_> = labels
                .iter()
                .map(|(path, label)| registry.set_override(path, label.as_str()))
                .collect();
            for crumb in registry.build_trail(&path) {
                let marker = if crumb.current { "*" } else { " " };
                println!("{marker} {}\t{}", crumb.label, crumb.href);
            }
        }
        Some(Commands::Nav { role }) => {
            let items = default_navigation();
            for item in visible_for(&items, role) {
                println!("{}\t{}", item.path, item.label);
            }
        }
        None => {
            println!("clinic: use --help to list commands");
        }
    }

    Ok(())
}
