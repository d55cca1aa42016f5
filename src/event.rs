use crate::assigner::ScoreAssigner;
use crate::error::BtResult;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// One reconstructed jet as read from / written to a jets CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetRecord {
    pub event: u64,
    pub pt: f64,
    pub eta: f64,
    pub flavor: i32,
    #[serde(default)]
    pub btag_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: u64,
    pub jets: Vec<JetRecord>,
}

pub fn read_jets<R: Read>(reader: R) -> BtResult<Vec<JetRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut jets = Vec::new();
    for result in rdr.deserialize() {
        jets.push(result?);
    }
    Ok(jets)
}

pub fn read_jets_file<P: AsRef<Path>>(path: P) -> BtResult<Vec<JetRecord>> {
    let path = path.as_ref();
    info!("📂 Loading jets from: {}", path.display());
    let jets = read_jets(File::open(path)?)?;
    debug!("   -> {} jets", jets.len());
    Ok(jets)
}

/// Groups consecutive jets sharing an event id, keeping input order.
pub fn group_events(jets: Vec<JetRecord>) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    for jet in jets {
        match events.last_mut() {
            Some(ev) if ev.id == jet.event => ev.jets.push(jet),
            _ => events.push(Event {
                id: jet.event,
                jets: vec![jet],
            }),
        }
    }
    events
}

/// Random stream for one event. Seeded streams depend only on the event id,
/// never on which worker picks the event up.
pub fn event_rng(seed: Option<u64>, event_id: u64) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s.wrapping_add(event_id)),
        None => fastrand::Rng::new(),
    }
}

/// Scores every jet of every event in parallel.
pub fn process_events(
    assigner: &ScoreAssigner,
    events: &mut [Event],
    seed: Option<u64>,
    signal_flavor: i32,
) {
    events.par_iter_mut().for_each(|ev| {
        let mut rng = event_rng(seed, ev.id);
        assigner.assign_jets(&mut ev.jets, signal_flavor, &mut rng);
    });
}

pub fn write_jets<W: Write>(writer: W, events: &[Event]) -> BtResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for jet in events.iter().flat_map(|ev| ev.jets.iter()) {
        wtr.serialize(jet)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_jets_file<P: AsRef<Path>>(path: P, events: &[Event]) -> BtResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_jets(File::create(path)?, events)?;
    info!("💾 Wrote scored jets to {}", path.display());
    Ok(())
}
