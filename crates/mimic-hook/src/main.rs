//! `mimic-hook`: print every global key transition until Ctrl+C.
//!
//! ```text
//! main()
//!  └─ KeyboardReceiver::new()   -- installs WH_KEYBOARD_LL on its own thread
//!      └─ handlers              -- forward to an unbounded channel (hook thread)
//!  └─ event pump                -- logs KeyDown / KeyUp (Tokio task)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mimic_core::{KeyDirection, KeyEventArgs};
use mimic_hook::application::{HookInstaller, KeyboardReceiver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let receiver = KeyboardReceiver::new(native_installer()?)?;

    // Handlers run on the hook thread; keep them to a channel send.
    let (tx, mut rx) = mpsc::unbounded_channel::<(KeyDirection, KeyEventArgs)>();
    let down_tx = tx.clone();
    receiver.key_down().subscribe(move |args| {
        let _ = down_tx.send((KeyDirection::Down, *args));
    });
    receiver.key_up().subscribe(move |args| {
        let _ = tx.send((KeyDirection::Up, *args));
    });

    let pump = tokio::spawn(async move {
        while let Some((direction, args)) = rx.recv().await {
            match direction {
                KeyDirection::Down => info!(key = %args.key_code, "KeyDown"),
                KeyDirection::Up => info!(key = %args.key_code, "KeyUp"),
            }
        }
    });

    info!("listening for keys; press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;

    // Dropping the receiver releases the handlers' senders, which ends the pump.
    receiver.dispose();
    drop(receiver);
    pump.await?;
    info!("stopped");
    Ok(())
}

#[cfg(target_os = "windows")]
fn native_installer() -> anyhow::Result<Arc<dyn HookInstaller>> {
    use mimic_hook::infrastructure::hook::windows::WindowsHookInstaller;

    Ok(Arc::new(WindowsHookInstaller::new()))
}

#[cfg(not(target_os = "windows"))]
fn native_installer() -> anyhow::Result<Arc<dyn HookInstaller>> {
    anyhow::bail!("mimic-hook installs a Windows low-level keyboard hook and cannot run on this platform")
}
