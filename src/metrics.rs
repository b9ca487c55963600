use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Opts, TextEncoder};

/// Register additional metrics of our own structs by using this registry instance.
static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry(prometheus::Registry::new()));

// Export special preconstructed counters for Teloxide's handlers.
pub static CMD_START_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_start", Opts::new("command_start_usage_total", "count of /start invocations"))
});
pub static INLINE_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("inline", Opts::new("inline_usage_total", "count of inline queries answered by the bot"))
});
pub static CALLBACK_VIEW: Lazy<ComplexCommandCounters> = Lazy::new(|| {
    let opts = Opts::new("callback_view_usage_total", "count of view callbacks and actual deliveries");
    ComplexCommandCounters {
        invoked: Counter::new("callback_view (requested)", opts.clone().const_label("state", "requested")),
        finished: Counter::new("callback_view (delivered)", opts.const_label("state", "delivered")),
    }
});
pub static CALLBACK_STATS_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("callback_stats", Opts::new("callback_stats_usage_total", "count of admin stats callbacks"))
});
pub static CMD_ADD_CHANNEL_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_addchannel", Opts::new("command_addchannel_usage_total", "count of /addchannel invocations"))
});
pub static CMD_ADD_CONTENT_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_addcontent", Opts::new("command_addcontent_usage_total", "count of /addcontent invocations"))
});

pub fn init() -> axum::Router {
    let prometheus = REGISTRY
        .register(&CMD_START_COUNTER)
        .register(&INLINE_COUNTER)
        .register(&CALLBACK_VIEW.invoked)
        .register(&CALLBACK_VIEW.finished)
        .register(&CALLBACK_STATS_COUNTER)
        .register(&CMD_ADD_CHANNEL_COUNTER)
        .register(&CMD_ADD_CONTENT_COUNTER)
        .unwrap();

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    axum::Router::new()
        .route("/metrics", get(|| async move {
            let mut buffer = vec![];
            let metrics = prometheus.gather();
            TextEncoder::new().encode(&metrics, &mut buffer).unwrap();
            let custom_metrics = String::from_utf8(buffer).unwrap();

            metric_handle.render() + custom_metrics.as_str()
        }))
        .layer(prometheus_layer)
}

pub struct Counter {
    inner: prometheus::Counter,
    name: String
}
pub struct ComplexCommandCounters {
    invoked: Counter,
    finished: Counter,
}
struct Registry(prometheus::Registry);

impl Counter {
    fn new(name: &str, opts: Opts) -> Counter {
        let c = prometheus::Counter::with_opts(opts)
            .unwrap_or_else(|e| panic!("unable to create {name} counter: {e}"));
        Counter { inner: c, name: name.to_string() }
    }

    pub fn inc(&self) {
        self.inner.inc()
    }
}

impl ComplexCommandCounters {
    pub fn invoked(&self) {
        self.invoked.inc()
    }

    pub fn finished(&self) {
        self.finished.inc()
    }
}

impl Registry {
    fn register(&self, counter: &Counter) -> &Self {
        self.0.register(Box::new(counter.inner.clone()))
            .unwrap_or_else(|e| panic!("unable to register the {} counter: {e}", counter.name));
        self
    }

    fn unwrap(&self) -> prometheus::Registry {
        self.0.clone()
    }
}
