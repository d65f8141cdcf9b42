use chrono::{DateTime, Duration, Utc};
use logfmt_codec::record::{decode_field, encode_field};
use logfmt_codec::{from_str, logfmt_record, to_string, unmarshal, Error, Field, Record};

#[derive(Debug, Default, PartialEq)]
struct Deploy {
    service: String,
    replicas: u8,
    ports: Vec<u32>,
    regions: Vec<String>,
    started: DateTime<Utc>,
    notes: String,
}

logfmt_record!(Deploy {
    service => "svc",
    replicas => "replicas",
    ports => "ports",
    regions => "regions",
    started => "started,2006-01-02 15:04",
});

#[test]
fn test_macro_field_table() {
    let names: Vec<_> = Deploy::fields().iter().map(Field::name).collect();
    assert_eq!(names, vec!["service", "replicas", "ports", "regions", "started"]);

    let started = &Deploy::fields()[4];
    assert_eq!(started.tag(), "started,2006-01-02 15:04");
    assert_eq!(started.metadata(), ("started", "2006-01-02 15:04"));
}

#[test]
fn test_macro_record_roundtrip() {
    let deploy = Deploy {
        service: "api".to_string(),
        replicas: 3,
        ports: vec![80, 443],
        regions: vec!["eu-west".to_string(), "us-east".to_string()],
        started: DateTime::parse_from_rfc3339("2024-03-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc),
        notes: "not encoded".to_string(),
    };

    let line = to_string(&deploy).unwrap();
    assert_eq!(
        line,
        r#"svc=api replicas=3 ports=80,443 regions=eu-west,us-east started="2024-03-01 12:30""#
    );

    let back: Deploy = from_str(&line).unwrap();
    assert_eq!(back.service, deploy.service);
    assert_eq!(back.ports, deploy.ports);
    assert_eq!(back.regions, deploy.regions);
    assert_eq!(back.started, deploy.started);
    assert!(back.notes.is_empty());
}

#[test]
fn test_out_of_range_integer_is_parse_error() {
    let mut deploy = Deploy {
        replicas: 2,
        ..Deploy::default()
    };
    let err = unmarshal(b"replicas=256", &mut deploy).unwrap_err();
    match err {
        Error::Parse { field, value, .. } => {
            assert_eq!(field, "replicas");
            assert_eq!(value, "256");
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert_eq!(deploy.replicas, 2);

    assert!(unmarshal(b"ports=80,-1", &mut deploy).is_err());
    assert!(unmarshal(b"replicas=-1", &mut deploy).is_err());
}

#[test]
fn test_empty_lists() {
    let mut deploy = Deploy {
        ports: vec![1],
        regions: vec!["x".to_string()],
        ..Deploy::default()
    };
    unmarshal(b"ports= regions=", &mut deploy).unwrap();
    assert!(deploy.ports.is_empty());
    assert!(deploy.regions.is_empty());
}

struct Timer {
    label: String,
    elapsed: Duration,
}

impl Record for Timer {
    fn fields() -> &'static [Field<Self>] {
        const FIELDS: &[Field<Timer>] = &[
            Field::new(
                "label",
                "label",
                |t, hint| encode_field(&t.label, hint),
                |t, raw, hint| decode_field(&mut t.label, raw, hint),
            ),
            Field::new(
                "elapsed",
                "elapsed_ms,ms",
                |t, hint| encode_field(&t.elapsed, hint),
                |t, raw, hint| decode_field(&mut t.elapsed, raw, hint),
            ),
        ];
        FIELDS
    }
}

#[test]
fn test_manual_record() {
    let mut timer = Timer {
        label: "warm up".to_string(),
        elapsed: Duration::milliseconds(1500),
    };
    assert_eq!(
        to_string(&timer).unwrap(),
        r#"label="warm up" elapsed_ms=1500"#
    );

    unmarshal(b"elapsed_ms=2.5 label=cool", &mut timer).unwrap();
    assert_eq!(timer.label, "cool");
    assert_eq!(timer.elapsed, Duration::microseconds(2500));
    assert_eq!(to_string(&timer).unwrap(), "label=cool elapsed_ms=2.5");
}

#[test]
fn test_negative_chrono_duration() {
    let mut timer = Timer {
        label: String::new(),
        elapsed: Duration::zero(),
    };
    unmarshal(b"elapsed_ms=-20", &mut timer).unwrap();
    assert_eq!(timer.elapsed, Duration::milliseconds(-20));
    assert_eq!(to_string(&timer).unwrap(), "label= elapsed_ms=-20");
}

#[derive(Default)]
struct Window {
    length: std::time::Duration,
}

logfmt_record!(Window {
    length => "length",
});

#[test]
fn test_std_duration_rejects_negative() {
    let mut window = Window::default();
    let err = unmarshal(b"length=-5s", &mut window).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(window.length, std::time::Duration::ZERO);

    unmarshal(b"length=1m30s", &mut window).unwrap();
    assert_eq!(window.length, std::time::Duration::from_secs(90));
    assert_eq!(to_string(&window).unwrap(), "length=1m30s");
}
