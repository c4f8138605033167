use std::io::{BufRead, Write};

use log::{debug, info, warn};
use sweepstake_exchange::model::{Clock, Submission};
use sweepstake_exchange::{Exchange, ExchangeError};
use thiserror::Error;

use crate::script::{ScriptCommand, ScriptOutcome};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode outcome: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Totals for one replayed script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands executed (skipped lines excluded)
    pub commands: usize,
    /// Submissions that crossed
    pub trades: usize,
    /// Commands the exchange refused
    pub rejected: usize,
    /// Lines that were not valid commands
    pub invalid: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: &ScriptOutcome) {
        match outcome {
            ScriptOutcome::Traded { .. } => self.trades += 1,
            ScriptOutcome::Rejected { .. } => self.rejected += 1,
            ScriptOutcome::Invalid { .. } => self.invalid += 1,
            _ => {}
        }
        self.commands += 1;
    }
}

/// Run one command against the exchange
pub fn execute<C: Clock>(exchange: &Exchange<C>, command: ScriptCommand) -> ScriptOutcome {
    let result = match command {
        ScriptCommand::Submit {
            side,
            code,
            participant,
            price,
        } => exchange
            .submit_order_str(side, &code, &participant, &price)
            .map(|submission| match submission {
                Submission::Traded(trade) => ScriptOutcome::Traded { trade },
                Submission::Accepted { order, amended } => {
                    ScriptOutcome::Accepted { order, amended }
                }
            }),
        ScriptCommand::Cancel {
            side,
            code,
            participant,
        } => exchange
            .cancel_order(side, &code, &participant)
            .map(|removed| ScriptOutcome::Canceled { removed }),
        ScriptCommand::Drop { code } => exchange
            .drop_instrument(&code)
            .map(|previous_owner| ScriptOutcome::Dropped { previous_owner }),
        ScriptCommand::SetOwner { code, participant } => exchange
            .set_owner(&code, &participant)
            .map(|changed| ScriptOutcome::OwnerSet { changed }),
        ScriptCommand::ShowBook { code, side } => {
            exchange
                .book(&code, side)
                .map(|orders| ScriptOutcome::Book { code, side, orders })
        }
        ScriptCommand::ShowOwners => Ok(ScriptOutcome::Owners {
            owners: exchange.owners(),
        }),
        ScriptCommand::ShowInstruments => Ok(ScriptOutcome::Instruments {
            instruments: exchange.instruments(),
        }),
    };

    result.unwrap_or_else(|err: ExchangeError| ScriptOutcome::rejected(&err))
}

/// Parse and run one script line; `None` for blank and comment lines
pub fn execute_line<C: Clock>(
    exchange: &Exchange<C>,
    line_number: usize,
    line: &str,
) -> Option<ScriptOutcome> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let outcome = match serde_json::from_str::<ScriptCommand>(line) {
        Ok(command) => {
            debug!("line {}: {:?}", line_number, command);
            execute(exchange, command)
        }
        Err(e) => {
            warn!("line {}: not a command: {}", line_number, e);
            ScriptOutcome::Invalid {
                line: line_number,
                reason: e.to_string(),
            }
        }
    };
    Some(outcome)
}

/// Replay a whole script, writing one JSON outcome per command to `output`
pub fn replay<C: Clock>(
    exchange: &Exchange<C>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let Some(outcome) = execute_line(exchange, idx + 1, &line) else {
            continue;
        };

        summary.record(&outcome);
        serde_json::to_writer(&mut output, &outcome)?;
        writeln!(output)?;
    }
    output.flush()?;

    info!(
        "Replayed {} commands: {} trades, {} rejected, {} invalid",
        summary.commands, summary.trades, summary.rejected, summary.invalid
    );
    Ok(summary)
}

/// Replay a script and keep the outcomes in memory
pub fn replay_collect<C: Clock>(
    exchange: &Exchange<C>,
    input: impl BufRead,
) -> Result<(ReplaySummary, Vec<ScriptOutcome>), ReplayError> {
    let mut summary = ReplaySummary::default();
    let mut outcomes = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        if let Some(outcome) = execute_line(exchange, idx + 1, &line?) {
            summary.record(&outcome);
            outcomes.push(outcome);
        }
    }
    Ok((summary, outcomes))
}
