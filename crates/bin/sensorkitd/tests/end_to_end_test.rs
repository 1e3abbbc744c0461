//! End-to-end tests for the full sensorkitd stack.
//!
//! Each test wires real drivers to a real in-process host and runs them
//! under the periodic poller. The thermostat's pages are served by a
//! wiremock server; browser automation is replaced by a recording applier.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sensorkit_adapter_nt160e::{
    ApplyError, FormSetting, HttpPageSource, Nt160eConfig, Nt160eDriver, SettingApplier,
};
use sensorkit_adapter_virtual_light::{VirtualLightConfig, VirtualLightDriver};
use sensorkit_app::host::{InProcessHost, ReadingEvent};
use sensorkit_app::poller::PeriodicPoller;
use sensorkit_app::ports::Driver;
use sensorkit_domain::path::StreamPath;
use sensorkit_domain::reading::ReadingValue;
use sensorkit_domain::value::StateValue;
use tokio::sync::broadcast;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAIN_PAGE: &str = r#"
<script>
var avgtemp = "75F";
var hvacStateS = "HEAT";
printFSC("Relative Humidity", "40%", "");
printFSC("Cool Setting", "78F", "OID4.1.6");
printFSC("Heat Setting", "68F", "OID4.1.5");
printFSC("Cool", "80F", "");
printFSC("Heat", "65F", "");
</script>
"#;

const SETTINGS_PAGE: &str = r#"printFSC("Temperature Scale", "FAHRENHEIT", "OID1.2.5");"#;

/// Shares its log with clones, so a test can keep one after handing the
/// applier to a driver.
#[derive(Clone, Default)]
struct RecordingApplier {
    applied: Arc<Mutex<Vec<FormSetting>>>,
}

impl SettingApplier for RecordingApplier {
    async fn apply(&self, _device_url: &Url, setting: &FormSetting) -> Result<(), ApplyError> {
        self.applied.lock().unwrap().push(setting.clone());
        Ok(())
    }
}

async fn next_event(events: &mut broadcast::Receiver<ReadingEvent>) -> ReadingEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("a reading should arrive in time")
        .expect("host channel should stay open")
}

/// Collect events until one for every path in `paths` has been seen.
async fn collect(
    events: &mut broadcast::Receiver<ReadingEvent>,
    paths: &[&str],
) -> Vec<ReadingEvent> {
    let mut seen = Vec::new();
    while !paths
        .iter()
        .all(|p| seen.iter().any(|e: &ReadingEvent| e.path.as_str() == *p))
    {
        seen.push(next_event(events).await);
    }
    seen
}

async fn thermostat_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.shtml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MAIN_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/settings.shtml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SETTINGS_PAGE))
        .mount(&server)
        .await;
    server
}

fn thermostat_config(server: &MockServer) -> Nt160eConfig {
    Nt160eConfig {
        url: server.uri(),
        login: "admin".to_string(),
        password: "admin".to_string(),
        request_timeout_secs: Some(5),
        ..Nt160eConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Virtual light
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn should_poll_light_and_reflect_actuation() {
    let host = Arc::new(InProcessHost::new(256));
    let mut events = host.subscribe();

    let mut light = VirtualLightDriver::new(VirtualLightConfig { read_period: 0.05 });
    light.setup(host.as_ref()).await.unwrap();
    let period = light.poll_interval();
    let mut poller = PeriodicPoller::start(Arc::new(light), Arc::clone(&host), period);

    collect(&mut events, &["/on", "/bri", "/hue", "/sat"]).await;
    assert_eq!(
        host.latest(&StreamPath::new("/bri")).unwrap().value,
        ReadingValue::Long(100)
    );

    host.actuate(&StreamPath::new("/bri_act"), StateValue::from("42"))
        .await
        .unwrap();

    loop {
        let event = next_event(&mut events).await;
        if event.path.as_str() == "/bri" && event.reading.value == ReadingValue::Long(42) {
            break;
        }
    }

    poller.stop();
    assert!(!poller.is_running());
}

// ---------------------------------------------------------------------------
// Thermostat
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn should_scrape_thermostat_over_http() {
    let server = thermostat_server().await;
    let config = thermostat_config(&server);
    let source = HttpPageSource::new(&config).unwrap();
    let mut thermostat =
        Nt160eDriver::with_parts(config, source, RecordingApplier::default()).unwrap();

    let host = Arc::new(InProcessHost::new(256));
    let mut events = host.subscribe();
    thermostat.setup(host.as_ref()).await.unwrap();
    let _poller = PeriodicPoller::start(
        Arc::new(thermostat),
        Arc::clone(&host),
        Duration::from_millis(50),
    );

    collect(
        &mut events,
        &[
            "/zone_temp",
            "/humidity",
            "/hvac_state",
            "/cool_setting",
            "/heat_setting",
            "/schedule_cool",
            "/schedule_heat",
        ],
    )
    .await;

    let zone = host.latest(&StreamPath::new("/zone_temp")).unwrap();
    let ReadingValue::Double(celsius) = zone.value else {
        panic!("zone_temp should be a double, got {:?}", zone.value);
    };
    assert!((celsius - 23.888_888_888_888_89).abs() < 1e-9);
    assert_eq!(
        host.latest(&StreamPath::new("/hvac_state")).unwrap().value,
        ReadingValue::Double(3.0)
    );
    assert_eq!(
        host.latest(&StreamPath::new("/heat_setting")).unwrap().value,
        ReadingValue::Double(68.0)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn should_keep_polling_after_device_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let config = thermostat_config(&server);
    let source = HttpPageSource::new(&config).unwrap();
    let mut thermostat =
        Nt160eDriver::with_parts(config, source, RecordingApplier::default()).unwrap();

    let host = Arc::new(InProcessHost::new(256));
    thermostat.setup(host.as_ref()).await.unwrap();
    let mut poller = PeriodicPoller::start(
        Arc::new(thermostat),
        Arc::clone(&host),
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(poller.is_running());
    assert!(host.latest(&StreamPath::new("/zone_temp")).is_none());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() > 1, "poller should retry on later ticks");
    poller.stop();
}

#[tokio::test(flavor = "multi_thread")]
async fn should_run_both_drivers_on_one_host() {
    let server = thermostat_server().await;
    let config = thermostat_config(&server);
    let source = HttpPageSource::new(&config).unwrap();
    let applier = RecordingApplier::default();
    let mut thermostat = Nt160eDriver::with_parts(config, source, applier.clone()).unwrap();
    let mut light = VirtualLightDriver::new(VirtualLightConfig { read_period: 0.05 });

    let host = Arc::new(InProcessHost::new(256));
    let mut events = host.subscribe();
    light.setup(host.as_ref()).await.unwrap();
    thermostat.setup(host.as_ref()).await.unwrap();
    assert_eq!(host.stream_paths().len(), 4 + 7);
    assert_eq!(host.actuator_paths().len(), 3 + 5);

    let _light = PeriodicPoller::start(Arc::new(light), Arc::clone(&host), Duration::from_millis(50));
    let _thermostat = PeriodicPoller::start(
        Arc::new(thermostat),
        Arc::clone(&host),
        Duration::from_millis(50),
    );

    collect(&mut events, &["/on", "/zone_temp"]).await;

    let written = host
        .actuate(&StreamPath::new("/cool_setting"), StateValue::Float(74.0))
        .await
        .unwrap();
    assert_eq!(written, None);
    let applied = applier.applied.lock().unwrap();
    assert_eq!(*applied, [FormSetting::new("OID4.1.6", "820")]);
}
