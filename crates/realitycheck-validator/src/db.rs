//! Database validation
//!
//! Cross-table consistency rules over one snapshot of the record store.
//! Every problem becomes a [`Finding`]; nothing here fails fast except the
//! boundary checks (location, connection, schema, read).

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::path::Path;
use std::ptr;

use realitycheck_domain::{
    AnalysisLog, AnalysisStatus, AnalysisTool, Chain, Claim, ClaimRelation, ClaimType, DomainCode,
    EvidenceLevel, Finding, Prediction, PredictionStatus, RecordKind, RecordStore, Source,
    SourceType,
};
use realitycheck_store::location::{DATA_ENV, DEFAULT_DB_PATH};
use realitycheck_store::{resolve_from_env, SqliteRecordStore};
use tracing::{debug, info, warn};

use crate::config::preview_ids;
use crate::ids::{is_chain_id, is_claim_id};
use crate::{ValidationConfig, ValidatorError};

/// Validate the store at `db_path`, or the one found by location resolution
pub fn validate_db(db_path: Option<&Path>, config: &ValidationConfig) -> Vec<Finding> {
    let Some(location) = resolve_from_env(db_path) else {
        warn!("No record store location could be resolved");
        return vec![Finding::error(
            "STORE_LOCATION_MISSING",
            format!(
                "{DATA_ENV} is not set and no database was found at '{DEFAULT_DB_PATH}' \
                 (or via project auto-detect). Set {DATA_ENV} or pass --db-path."
            ),
        )];
    };

    debug!(path = %location.path.display(), origin = %location.origin, "Resolved record store");

    let store = match SqliteRecordStore::open_read_only(&location.path) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Cannot open record store");
            return vec![Finding::error(
                "STORE_CONNECTION",
                format!("Cannot connect to database: {e}"),
            )];
        }
    };

    validate_store(&store, config)
}

/// Validate every record held by `store`
pub fn validate_store<S>(store: &S, config: &ValidationConfig) -> Vec<Finding>
where
    S: RecordStore,
    S::Error: Display,
{
    let tables: HashSet<String> = match store.table_names() {
        Ok(names) => names.into_iter().collect(),
        Err(e) => {
            warn!(error = %e, "Cannot list store tables");
            return vec![Finding::error("STORE_READ", format!("Error reading database: {e}"))];
        }
    };

    let mut missing: Vec<&str> = RecordKind::required_kinds()
        .map(|kind| kind.table_name())
        .filter(|name| !tables.contains(*name))
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return vec![Finding::error(
            "STORE_TABLES_MISSING",
            format!("Missing tables: {}", missing.join(", ")),
        )];
    }

    let snapshot = match Snapshot::load(store, config.snapshot_limit) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Cannot read store snapshot");
            return vec![Finding::error("STORE_READ", format!("Error reading database: {e}"))];
        }
    };

    let mut findings = Vec::new();
    snapshot.check_claims(&mut findings);
    snapshot.check_sources(&mut findings);
    snapshot.check_chains(config, &mut findings);
    snapshot.check_predictions(config, &mut findings);

    if tables.contains(RecordKind::AnalysisLogs.table_name()) {
        match store.list_analysis_logs(config.snapshot_limit) {
            Ok(logs) => snapshot.check_analysis_logs(&logs, &mut findings),
            Err(e) => {
                warn!(error = %e, "Cannot read analysis logs");
                findings.push(Finding::error(
                    "ANALYSIS_LOGS_READ",
                    format!("Error reading analysis_logs: {e}"),
                ));
            }
        }
    }

    info!(
        findings = findings.len(),
        errors = findings.iter().filter(|f| f.is_error()).count(),
        "Database validation finished"
    );
    findings
}

/// One call's in-memory copy of the store plus membership indexes
struct Snapshot {
    claims: Vec<Claim>,
    sources: Vec<Source>,
    chains: Vec<Chain>,
    predictions: Vec<Prediction>,
    claim_index: HashMap<String, usize>,
    source_ids: HashSet<String>,
    chain_ids: HashSet<String>,
}

impl Snapshot {
    fn load<S>(store: &S, limit: usize) -> Result<Self, ValidatorError>
    where
        S: RecordStore,
        S::Error: Display,
    {
        let read = |e: S::Error| ValidatorError::Store(e.to_string());

        let claims = store.list_claims(limit).map_err(read)?;
        let sources = store.list_sources(limit).map_err(read)?;
        let chains = store.list_chains(limit).map_err(read)?;
        let predictions = store.list_predictions(limit).map_err(read)?;

        debug!(
            claims = claims.len(),
            sources = sources.len(),
            chains = chains.len(),
            predictions = predictions.len(),
            "Loaded store snapshot"
        );

        let claim_index = claims
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let source_ids = sources.iter().map(|s| s.id.clone()).collect();
        let chain_ids = chains.iter().map(|c| c.id.clone()).collect();

        Ok(Self {
            claims,
            sources,
            chains,
            predictions,
            claim_index,
            source_ids,
            chain_ids,
        })
    }

    fn claim(&self, id: &str) -> Option<&Claim> {
        self.claim_index.get(id).map(|&i| &self.claims[i])
    }

    fn has_claim(&self, id: &str) -> bool {
        self.claim_index.contains_key(id)
    }

    fn check_claims(&self, findings: &mut Vec<Finding>) {
        for claim in &self.claims {
            let id = &claim.id;

            if !is_claim_id(id) {
                findings.push(Finding::error(
                    "CLAIM_ID_FORMAT",
                    format!("Invalid claim ID format: {id}"),
                ));
                continue;
            }

            let id_domain = claim.id_domain();
            if claim.domain != id_domain {
                findings.push(Finding::error(
                    "CLAIM_DOMAIN_MISMATCH",
                    format!("{id}: ID domain '{id_domain}' != field domain '{}'", claim.domain),
                ));
            }

            if DomainCode::parse(&claim.domain).is_none() {
                findings.push(Finding::error(
                    "CLAIM_DOMAIN_INVALID",
                    format!("{id}: Invalid domain '{}'", claim.domain),
                ));
            }

            if ClaimType::parse(&claim.claim_type).is_none() {
                findings.push(Finding::error(
                    "CLAIM_TYPE_INVALID",
                    format!("{id}: Invalid type '{}'", claim.claim_type),
                ));
            }

            if EvidenceLevel::parse(&claim.evidence_level).is_none() {
                findings.push(Finding::error(
                    "CLAIM_EVIDENCE_INVALID",
                    format!("{id}: Invalid evidence_level '{}'", claim.evidence_level),
                ));
            }

            if !claim.credence.is_probability() {
                findings.push(Finding::error(
                    "CLAIM_CREDENCE_INVALID",
                    format!("{id}: Invalid credence '{}'", claim.credence),
                ));
            }

            if claim.text.trim().is_empty() {
                findings.push(Finding::error(
                    "CLAIM_TEXT_EMPTY",
                    format!("{id}: Missing or empty text"),
                ));
            }

            for source_id in &claim.source_ids {
                if !self.source_ids.contains(source_id) {
                    findings.push(Finding::error(
                        "CLAIM_SOURCE_MISSING",
                        format!("{id}: References unknown source '{source_id}'"),
                    ));
                }
            }

            for relation in ClaimRelation::ALL {
                for target in claim.related(relation) {
                    if !self.has_claim(target) {
                        findings.push(Finding::error(
                            "CLAIM_REL_MISSING",
                            format!("{id}: {relation} references unknown claim '{target}'"),
                        ));
                    }
                }
            }

            if let Some(chain) = claim.part_of_chain.as_deref() {
                if !self.chain_ids.contains(chain) {
                    findings.push(Finding::error(
                        "CLAIM_CHAIN_MISSING",
                        format!("{id}: References unknown chain '{chain}'"),
                    ));
                }
            }

            if !claim.has_embedding() {
                findings.push(Finding::warn(
                    "CLAIM_NO_EMBEDDING",
                    format!("{id}: Missing embedding"),
                ));
            }
        }
    }

    fn check_sources(&self, findings: &mut Vec<Finding>) {
        // Claims citing each source, in snapshot order, once per claim
        let mut citing: HashMap<&str, Vec<&Claim>> = HashMap::new();
        for claim in &self.claims {
            for source_id in &claim.source_ids {
                let cited_by = citing.entry(source_id.as_str()).or_default();
                if !cited_by.last().is_some_and(|last| ptr::eq(*last, claim)) {
                    cited_by.push(claim);
                }
            }
        }

        for source in &self.sources {
            let id = &source.id;

            if SourceType::parse(&source.source_type).is_none() {
                findings.push(Finding::error(
                    "SOURCE_TYPE_INVALID",
                    format!("{id}: Invalid type '{}'", source.source_type),
                ));
            }

            if !source.reliability.is_null() && !source.reliability.is_probability() {
                findings.push(Finding::error(
                    "SOURCE_RELIABILITY_INVALID",
                    format!("{id}: Invalid reliability '{}'", source.reliability),
                ));
            }

            for claim_id in &source.claims_extracted {
                match self.claim(claim_id) {
                    None => findings.push(Finding::error(
                        "SOURCE_CLAIM_MISSING",
                        format!("{id}: claims_extracted references unknown claim '{claim_id}'"),
                    )),
                    Some(claim) if !claim.cites(id) => findings.push(Finding::error(
                        "SOURCE_BACKLINK_MISSING",
                        format!("{id}: lists {claim_id} but claim doesn't reference this source"),
                    )),
                    Some(_) => {}
                }
            }

            for claim in citing.get(id.as_str()).into_iter().flatten() {
                if !source.lists(&claim.id) {
                    findings.push(Finding::error(
                        "SOURCE_CLAIM_NOT_LISTED",
                        format!(
                            "{id}: claim {} cites this source but not in claims_extracted",
                            claim.id
                        ),
                    ));
                }
            }
        }
    }

    fn check_chains(&self, config: &ValidationConfig, findings: &mut Vec<Finding>) {
        for chain in &self.chains {
            let id = &chain.id;

            if !is_chain_id(id) {
                findings.push(Finding::error(
                    "CHAIN_ID_FORMAT",
                    format!("Invalid chain ID format: {id}"),
                ));
                continue;
            }

            if !chain.credence.is_probability() {
                findings.push(Finding::error(
                    "CHAIN_CREDENCE_INVALID",
                    format!("{id}: Invalid credence '{}'", chain.credence),
                ));
            }

            for claim_id in &chain.claims {
                if !self.has_claim(claim_id) {
                    findings.push(Finding::error(
                        "CHAIN_CLAIM_MISSING",
                        format!("{id}: References unknown claim '{claim_id}'"),
                    ));
                }
            }

            // A chain is no stronger than its weakest link
            let min_credence = chain
                .claims
                .iter()
                .filter_map(|cid| self.claim(cid))
                .map(|c| c.credence.as_f64().unwrap_or(1.0))
                .reduce(f64::min);

            if let (Some(min), Some(credence)) = (min_credence, chain.credence.as_f64()) {
                if credence > min + config.chain_credence_tolerance {
                    findings.push(Finding::warn(
                        "CHAIN_CREDENCE_EXCEEDS_MIN",
                        format!("{id}: Chain credence {credence:?} > min claim credence {min:?}"),
                    ));
                }
            }
        }
    }

    fn check_predictions(&self, config: &ValidationConfig, findings: &mut Vec<Finding>) {
        for prediction in &self.predictions {
            let claim_id = &prediction.claim_id;

            if PredictionStatus::parse(&prediction.status).is_none() {
                findings.push(Finding::error(
                    "PREDICTION_STATUS_INVALID",
                    format!("Prediction {claim_id}: Invalid status '{}'", prediction.status),
                ));
            }

            match self.claim(claim_id) {
                None => findings.push(Finding::error(
                    "PREDICTION_CLAIM_MISSING",
                    format!("Prediction references unknown claim '{claim_id}'"),
                )),
                Some(claim) if !claim.is_prediction() => findings.push(Finding::error(
                    "PREDICTION_CLAIM_NOT_P",
                    format!("Prediction {claim_id}: Claim is not type [P]"),
                )),
                Some(_) => {}
            }

            if let Some(source_id) = prediction.source_id.as_deref() {
                if !self.source_ids.contains(source_id) {
                    findings.push(Finding::error(
                        "PREDICTION_SOURCE_MISSING",
                        format!("Prediction {claim_id}: References unknown source '{source_id}'"),
                    ));
                }
            }
        }

        let tracked: HashSet<&str> = self.predictions.iter().map(|p| p.claim_id.as_str()).collect();
        let mut untracked: Vec<&str> = self
            .claims
            .iter()
            .filter(|c| c.is_prediction() && !tracked.contains(c.id.as_str()))
            .map(|c| c.id.as_str())
            .collect();

        if !untracked.is_empty() {
            untracked.sort_unstable();
            untracked.dedup();
            findings.push(Finding::error(
                "PREDICTIONS_MISSING",
                format!(
                    "{} [P] claims without prediction records: {}",
                    untracked.len(),
                    preview_ids(&untracked, config.missing_preview_limit)
                ),
            ));
        }
    }

    fn check_analysis_logs(&self, logs: &[AnalysisLog], findings: &mut Vec<Finding>) {
        debug!(logs = logs.len(), "Checking analysis logs");

        for log in logs {
            let id = &log.id;
            let status = log.parsed_status();

            if status.is_none() {
                findings.push(Finding::error(
                    "ANALYSIS_STATUS_INVALID",
                    format!("{id}: Invalid status '{}'", log.status),
                ));
            }

            if AnalysisTool::parse(&log.tool).is_none() {
                findings.push(Finding::error(
                    "ANALYSIS_TOOL_INVALID",
                    format!("{id}: Invalid tool '{}'", log.tool),
                ));
            }

            if status == Some(AnalysisStatus::Completed) {
                if let Some(source_id) = log.source_id.as_deref() {
                    if !self.source_ids.contains(source_id) {
                        findings.push(Finding::error(
                            "ANALYSIS_SOURCE_MISSING",
                            format!(
                                "{id}: Completed analysis references unknown source '{source_id}'"
                            ),
                        ));
                    }
                }
            }

            if status != Some(AnalysisStatus::Draft) {
                let lists = [
                    ("claims_extracted", &log.claims_extracted),
                    ("claims_updated", &log.claims_updated),
                ];
                for (field, claim_ids) in lists {
                    for claim_id in claim_ids {
                        if !self.has_claim(claim_id) {
                            findings.push(Finding::error(
                                "ANALYSIS_CLAIM_MISSING",
                                format!("{id}: {field} references unknown claim '{claim_id}'"),
                            ));
                        }
                    }
                }
            }

            if let Some(stages) = log.stages_json.as_deref().filter(|s| !s.is_empty()) {
                if serde_json::from_str::<serde_json::Value>(stages).is_err() {
                    findings.push(Finding::error(
                        "ANALYSIS_STAGES_INVALID_JSON",
                        format!("{id}: stages_json is not valid JSON"),
                    ));
                }
            }

            if let Some(duration) = log.duration_seconds.filter(|d| *d < 0.0) {
                findings.push(Finding::error(
                    "ANALYSIS_DURATION_NEGATIVE",
                    format!("{id}: Negative duration_seconds: {duration:?}"),
                ));
            }

            if let Some(cost) = log.cost_usd.filter(|c| *c < 0.0) {
                findings.push(Finding::error(
                    "ANALYSIS_COST_NEGATIVE",
                    format!("{id}: Negative cost_usd: {cost:?}"),
                ));
            }
        }
    }
}
