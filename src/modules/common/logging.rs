use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(verbose: bool) {
    // 创建日志目录
    let log_dir = get_log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    // 设置文件输出
    let file_appender = tracing_appender::rolling::daily(&log_dir, "xiezai.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 保持 guard 存活
    std::mem::forget(_guard);

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter_directives(
            verbose,
        )))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}

/// 过滤指令同时命名二进制与库两个 crate 目标，两棵模块树的事件都受 verbose 控制
fn filter_directives(verbose: bool) -> String {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    format!("xiezai={},xiezai_lib={},info", level, level)
}

pub fn get_log_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("xiezai")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingLayer(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CountingLayer {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn delivered(verbose: bool, emit: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(filter_directives(
                verbose,
            )))
            .with(CountingLayer(count.clone()));

        tracing::subscriber::with_default(subscriber, emit);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn verbose_filter_delivers_debug_events_from_both_crate_targets() {
        let count = delivered(true, || {
            tracing::debug!(target: "xiezai::modules::scanner::paths", "递归扫描目录");
            tracing::debug!(target: "xiezai_lib::modules::scanner::paths", "递归扫描目录");
        });

        assert_eq!(count, 2);
    }

    #[test]
    fn default_filter_keeps_info_and_drops_debug() {
        let count = delivered(false, || {
            tracing::info!(target: "xiezai::modules::remover", "发现相关进程");
            tracing::debug!(target: "xiezai::modules::remover", "选用包管理器");
        });

        assert_eq!(count, 1);
    }
}
