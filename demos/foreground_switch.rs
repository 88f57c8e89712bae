//! # Foreground Switch Example
//!
//! Two screens share one router. Each keeps an ordinary listener, and the
//! screen in front owns the exclusive slot:
//! - "network connected" reaches only the foreground screen
//! - "theme changed" reaches every live screen
//! - tearing down a screen that was already displaced leaves the owner alone
//!
//! ## Run
//! ```bash
//! RUST_LOG=screenbus=debug cargo run --example foreground_switch
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use screenbus::{Event, EventKind, Listener, ListenerFn, Router, RouterConfig};

struct ScreenCounters {
    name: &'static str,
    network: AtomicU64,
    redraws: AtomicU64,
}

impl ScreenCounters {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            network: AtomicU64::new(0),
            redraws: AtomicU64::new(0),
        })
    }

    fn print(&self) {
        println!(
            " ├─► {}: network={} redraws={}",
            self.name,
            self.network.load(Ordering::Relaxed),
            self.redraws.load(Ordering::Relaxed)
        );
    }
}

#[async_trait::async_trait]
impl Listener for ScreenCounters {
    async fn on_event(&self, ev: &Event) {
        if matches!(ev.kind, EventKind::NetworkConnected) {
            self.network.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

fn ordinary(screen: &Arc<ScreenCounters>) -> Arc<dyn Listener> {
    let screen = Arc::clone(screen);
    ListenerFn::arc(screen.name, move |ev: &Event| {
        if matches!(ev.kind, EventKind::ThemeOrFontChanged) {
            screen.redraws.fetch_add(1, Ordering::Relaxed);
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let router = Router::new(RouterConfig::default());
    let article = ScreenCounters::new("article");
    let settings = ScreenCounters::new("settings");

    let _article_sub = router.subscribe(ordinary(&article));
    let _settings_sub = router.subscribe(ordinary(&settings));

    let article_exclusive: Arc<dyn Listener> = article.clone();
    let settings_exclusive: Arc<dyn Listener> = settings.clone();

    router.on_foreground(Arc::clone(&article_exclusive));
    router.publish(EventKind::NetworkConnected);

    router.on_foreground(Arc::clone(&settings_exclusive));
    router.publish(EventKind::NetworkConnected);
    router.publish(EventKind::ThemeOrFontChanged);
    router.flush().await?;

    // "article" was displaced, so its teardown is a no-op.
    let cleared = router.on_teardown(&article_exclusive);
    println!("article teardown cleared slot: {cleared}");
    println!("slot owner: {:?}", router.slot().occupant_name());

    println!();
    println!("Counters:");
    article.print();
    settings.print();
    println!(" └─► delivered={}", router.stats().delivered);

    router.shutdown().await;
    Ok(())
}
