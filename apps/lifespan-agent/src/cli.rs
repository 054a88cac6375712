// [apps/lifespan-agent/src/cli.rs]
/*!
 * APARATO: SUPERFICIE DE LINEA DE COMANDOS (ESTRATO L4-APP)
 * RESPONSABILIDAD: Traduce argv en una de las operaciones que spec.md
 * 6/183 expone a nivel de biblioteca (`scheduler.start()`,
 * `kill_switch_status()`, `force_run(task_name)`,
 * `get_session_pnl()`/`add_session_pnl(delta_cents)`/
 * `reset_session_pnl()`/`reset_kill_switch()`).
 */

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lifespan-agent", about = "Runs the lifespan engine's cooperative tick loop.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the scheduler forever. This is the default when no subcommand is given.
    Run,
    /// Prints the kill switch status and exits.
    Status,
    /// Runs a single named task immediately, bypassing scheduling but not the lease, tier gate, or kill switch.
    ForceRun { task_name: String },
    /// Prints the running session P&L balance in cents and exits.
    Pnl,
    /// Applies a P&L delta (in cents, may be negative) and prints the resulting kill switch status.
    AddPnl { delta_cents: i64 },
    /// Zeroes the running session P&L balance without clearing an active halt.
    ResetPnl,
    /// Clears an active kill switch halt regardless of whether it has expired.
    ResetKillSwitch,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
