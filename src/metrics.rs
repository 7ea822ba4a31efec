use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static::lazy_static! {
    pub static ref REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "meili_client_requests_total", "Total HTTP requests issued", &["function", "status"]
    ).unwrap();
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "meili_client_request_duration_seconds", "HTTP request duration", &["function"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();
    pub static ref UPDATE_POLLS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "meili_client_update_polls_total", "Update status polls", &["index"]
    ).unwrap();
    pub static ref UPDATE_WAITS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "meili_client_update_waits_total", "Finished update waits", &["index", "outcome"]
    ).unwrap();
    pub static ref UPDATE_WAIT_DURATION: HistogramVec = register_histogram_vec!(
        "meili_client_update_wait_duration_seconds", "Time spent waiting for updates", &["index"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    ).unwrap();
}

pub fn init() {
    lazy_static::initialize(&REQUESTS_TOTAL);
    lazy_static::initialize(&REQUEST_DURATION);
    lazy_static::initialize(&UPDATE_POLLS_TOTAL);
    lazy_static::initialize(&UPDATE_WAITS_TOTAL);
    lazy_static::initialize(&UPDATE_WAIT_DURATION);
}
