//! Coldtrace demo: one refrigerated shipment from creation to claim payout.
//!
//! Walks the full transition surface in commit order:
//!
//! 1. **Deployment & enrollment** — owner deploys the core and authorizes a
//!    sensor; a rogue sensor stays locked out
//! 2. **Telemetry** — in-band readings leave the shipment compliant; an
//!    excursion appends a violation and flips the shipment to violated
//! 3. **Claim workflow** — filing is gated on the violated state and the
//!    configured coverage, then the owner approves and settles

use colored::Colorize;

use coldtrace_service::ColdChainCore;
use coldtrace_types::{
    AccountId, CallContext, EvidenceHash, InsuranceTerms, LedgerHeight, SensorId, ShipmentSpec,
    Temperature, TemperatureRange, ThresholdSpec,
};

fn separator() {
    println!("{}", "━".repeat(72).dimmed());
}

fn header(title: &str) {
    println!();
    println!("{}", "═".repeat(72).cyan());
    println!("  {}", title.cyan().bold());
    println!("{}", "═".repeat(72).cyan());
}

fn outcome<T: std::fmt::Display, E: std::fmt::Display>(label: &str, result: &Result<T, E>) {
    match result {
        Ok(value) => println!("  {} {label}: {}", "✓".green(), value.to_string().yellow()),
        Err(error) => println!("  {} {label}: {}", "✗".red(), error.to_string().red()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║    Coldtrace: Cold-Chain Custody Audit                       ║".cyan().bold());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".cyan());

    let owner = AccountId::new("pharma-co");
    let carrier = AccountId::new("coldfreight");
    let gateway = AccountId::new("edge-gateway");
    let probe = SensorId::new("reefer-probe-17");

    // One committed transition per height, as the substrate would apply them.
    let mut height = 0u64;
    let mut at = |caller: &AccountId| {
        height += 1;
        CallContext::new(caller.clone(), LedgerHeight(height))
    };

    let mut core = ColdChainCore::new(owner.clone());

    // ── Part 1: Deployment & sensor enrollment ──────────────────────
    header("Part 1: Deployment & Sensor Enrollment");

    outcome(
        "authorize reefer-probe-17",
        &core
            .authorize_sensor(&at(&owner), probe.clone())
            .map(|_| "enrolled"),
    );
    outcome(
        "rogue enrollment attempt by carrier",
        &core
            .authorize_sensor(&at(&carrier), SensorId::new("rogue-probe"))
            .map(|_| "enrolled"),
    );
    separator();
    println!(
        "  authorized sensors: {}",
        core.is_sensor_authorized(&probe).to_string().yellow()
    );

    // ── Part 2: Shipment creation & telemetry ───────────────────────
    header("Part 2: Shipment Creation & Telemetry");

    let spec = ShipmentSpec {
        carrier: carrier.clone(),
        product: "insulin, 400 vials".into(),
        origin: "plant-helsinki".into(),
        destination: "clinic-rotterdam".into(),
        thresholds: ThresholdSpec::Explicit(TemperatureRange::new(
            Temperature(20),
            Temperature(80),
        )),
        insurance: Some(InsuranceTerms::coverage(50_000)),
    };
    let shipment = core
        .create_shipment(&at(&owner), spec)
        .expect("valid threshold range");
    println!("  {} created {}", "✓".green(), shipment.to_string().yellow());

    let bad_range = ShipmentSpec {
        carrier: carrier.clone(),
        product: "mislabelled lot".into(),
        origin: "plant-helsinki".into(),
        destination: "clinic-rotterdam".into(),
        thresholds: ThresholdSpec::Explicit(TemperatureRange::new(
            Temperature(80),
            Temperature(20),
        )),
        insurance: None,
    };
    outcome(
        "creation with inverted thresholds",
        &core.create_shipment(&at(&owner), bad_range),
    );
    separator();

    for (temperature, location) in [
        (Temperature(45), "loading dock, helsinki"),
        (Temperature(52), "ferry hold"),
        (Temperature(90), "truck 12, reefer fault"),
        (Temperature(135), "truck 12, reefer fault"),
    ] {
        let result = core.record_temperature(
            &at(&gateway),
            shipment,
            temperature,
            probe.clone(),
            location.into(),
        );
        outcome(&format!("reading {temperature} at {location}"), &result);
    }

    outcome(
        "reading from unenrolled sensor",
        &core.record_temperature(
            &at(&gateway),
            shipment,
            Temperature(50),
            SensorId::new("rogue-probe"),
            "unknown".into(),
        ),
    );

    separator();
    let record = core.shipment(shipment).expect("shipment exists");
    println!("  status:     {}", record.status.to_string().yellow());
    println!("  compliant:  {}", record.compliant.to_string().yellow());
    println!(
        "  violations: {}",
        core.violation_count(shipment).to_string().yellow()
    );
    for violation in core.violations(shipment) {
        println!(
            "  {} seq {}: {} {} ({} tenths beyond bound)",
            "│".dimmed(),
            violation.seq,
            violation.severity.to_string().red(),
            violation.temperature,
            violation.deviation
        );
    }

    // ── Part 3: Claim workflow ──────────────────────────────────────
    header("Part 3: Insurance Claim Workflow");

    outcome(
        "claim above coverage",
        &core.file_insurance_claim(
            &at(&owner),
            shipment,
            75_000,
            EvidenceHash::digest(b"excursion report, truck 12"),
        ),
    );

    let claim = core
        .file_insurance_claim(
            &at(&owner),
            shipment,
            42_500,
            EvidenceHash::digest(b"excursion report, truck 12"),
        )
        .expect("violated and within coverage");
    println!("  {} filed {}", "✓".green(), claim.to_string().yellow());

    outcome(
        "second claim against the same shipment",
        &core.file_insurance_claim(&at(&carrier), shipment, 1_000, EvidenceHash::digest(b"dup")),
    );

    outcome(
        "settlement before approval",
        &core.settle_claim(&at(&owner), claim).map(|_| "settled"),
    );
    outcome(
        "approval by owner",
        &core.approve_claim(&at(&owner), claim).map(|_| "approved"),
    );
    outcome(
        "settlement by owner",
        &core.settle_claim(&at(&owner), claim).map(|_| "settled"),
    );

    outcome(
        "violation alert resolution",
        &core
            .resolve_violation(
                &at(&owner),
                shipment,
                0,
                Some("reefer unit replaced in rotterdam".into()),
            )
            .map(|_| "resolved"),
    );

    separator();
    let record = core.shipment(shipment).expect("shipment exists");
    let settled = core.claim(claim).expect("claim exists");
    println!("  final shipment status: {}", record.status.to_string().yellow());
    println!("  final claim status:    {}", settled.status.to_string().yellow());
    println!(
        "  evidence hash:         {}",
        settled.evidence.to_string().dimmed()
    );
    println!(
        "  readings on ledger:    {}",
        core.reading_count(shipment).to_string().yellow()
    );
    println!();
}
