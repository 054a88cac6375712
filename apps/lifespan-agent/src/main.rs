// [apps/lifespan-agent/src/main.rs]
/*!
 * APARATO: PUNTO DE ENTRADA DEL BINARIO (ESTRATO L4-APP)
 * RESPONSABILIDAD: Carga el entorno, inicializa la telemetria, levanta
 * el runtime de Tokio y despacha el subcomando pedido. El unico lugar
 * del workspace que devuelve `anyhow::Result`.
 */

use clap::Parser;
use lifespan_agent::cli::{Cli, Command};
use lifespan_agent::{EngineConfig, LifespanKernel};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    lifespan_shared_telemetry::init_tracing("lifespan_agent");

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(async {
        let config = EngineConfig::from_env();
        let kernel = LifespanKernel::ignite(config).await;

        match cli.command() {
            Command::Run => {
                info!("lifespan engine online");
                kernel.run().await;
                Ok(())
            }
            Command::Status => {
                let status = kernel.kill_switch_status().await?;
                println!("{}", serde_json::to_string_pretty(&status)?);
                Ok(())
            }
            Command::ForceRun { task_name } => {
                let result = kernel.force_run(&task_name).await?;
                println!("{result}");
                Ok(())
            }
            Command::Pnl => {
                let cents = kernel.get_session_pnl().await?;
                println!("{cents}");
                Ok(())
            }
            Command::AddPnl { delta_cents } => {
                let status = kernel.add_session_pnl(delta_cents).await?;
                println!("{}", serde_json::to_string_pretty(&status)?);
                Ok(())
            }
            Command::ResetPnl => {
                kernel.reset_session_pnl().await?;
                println!("session P&L reset to 0");
                Ok(())
            }
            Command::ResetKillSwitch => {
                kernel.reset_kill_switch().await?;
                println!("kill switch cleared");
                Ok(())
            }
        }
    })
}
