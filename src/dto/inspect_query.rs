use crate::common::*;

use crate::dto::http_event::*;
use crate::model::chart::chart_request::*;

#[doc = "Fallbacks for query parameters the caller leaves out, and the limits on ping fan-out."]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct InspectDefaults {
    pub width: u32,
    pub height: u32,
    pub chart: String,
    pub try_count: u32,
    pub max_try_count: u32,
    pub max_hosts: usize,
}

#[doc = "Parsed `/makechart-inspect` query."]
#[derive(Debug, Clone, PartialEq)]
pub enum InspectQuery {
    Netdata {
        width: u32,
        height: u32,
        chart: String,
        max: Option<f64>,
    },
    Ping {
        width: u32,
        height: u32,
        hosts: Vec<String>,
        try_count: u32,
    },
    Memory {
        width: u32,
        height: u32,
    },
}

fn parse_param<T: FromStr>(event: &HttpEvent, key: &str) -> anyhow::Result<Option<T>> {
    event
        .query_param(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                anyhow!("[InspectQuery->from_event] query parameter '{}' is invalid: {:?}", key, raw)
            })
        })
        .transpose()
}

impl InspectQuery {
    pub fn from_event(event: &HttpEvent, defaults: &InspectDefaults) -> anyhow::Result<Self> {
        let width: u32 = parse_param(event, "width")?.unwrap_or(defaults.width);
        let height: u32 = parse_param(event, "height")?.unwrap_or(defaults.height);
        validate_canvas(width, height)?;

        let query: InspectQuery = match event.query_param("type") {
            Some("netdata") => InspectQuery::Netdata {
                width,
                height,
                chart: event
                    .query_param("chart")
                    .map(str::to_string)
                    .unwrap_or_else(|| defaults.chart.clone()),
                max: parse_param(event, "max")?,
            },
            Some("ping") => {
                let hosts: Vec<String> = event
                    .query_param("hosts")
                    .map(|raw| {
                        raw.split(',')
                            .map(str::trim)
                            .filter(|h| !h.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();

                if hosts.is_empty() {
                    return Err(anyhow!(
                        "[InspectQuery->from_event] 'hosts' is required for type=ping"
                    ));
                }

                if hosts.len() > defaults.max_hosts {
                    return Err(anyhow!(
                        "[InspectQuery->from_event] at most {} hosts are allowed, got {}",
                        defaults.max_hosts,
                        hosts.len()
                    ));
                }

                let try_count: u32 = parse_param(event, "trycount")?.unwrap_or(defaults.try_count);
                if try_count == 0 || try_count > defaults.max_try_count {
                    return Err(anyhow!(
                        "[InspectQuery->from_event] 'trycount' must be between 1 and {}, got {}",
                        defaults.max_try_count,
                        try_count
                    ));
                }

                InspectQuery::Ping {
                    width,
                    height,
                    hosts,
                    try_count,
                }
            }
            Some("memory") => InspectQuery::Memory { width, height },
            Some(other) => {
                return Err(anyhow!(
                    "[InspectQuery->from_event] unsupported inspect type: {:?}",
                    other
                ));
            }
            None => return Err(anyhow!("[InspectQuery->from_event] 'type' is required")),
        };

        Ok(query)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InspectQuery::Netdata { .. } => "netdata",
            InspectQuery::Ping { .. } => "ping",
            InspectQuery::Memory { .. } => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::chart_error::*;

    fn defaults() -> InspectDefaults {
        InspectDefaults::new(640, 480, "system.cpu".to_string(), 3, 10, 4)
    }

    fn event(params: &[(&str, &str)]) -> HttpEvent {
        HttpEvent::new(
            "/makechart-inspect".to_string(),
            Some(
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            None,
            false,
        )
    }

    #[test]
    fn netdata_defaults_apply() {
        let query: InspectQuery = InspectQuery::from_event(&event(&[("type", "netdata")]), &defaults()).unwrap();
        assert_eq!(
            query,
            InspectQuery::Netdata {
                width: 640,
                height: 480,
                chart: "system.cpu".to_string(),
                max: None
            }
        );
    }

    #[test]
    fn netdata_overrides_are_parsed() {
        let query: InspectQuery = InspectQuery::from_event(
            &event(&[("type", "netdata"), ("chart", "system.ram"), ("max", "100"), ("width", "320")]),
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            query,
            InspectQuery::Netdata {
                width: 320,
                height: 480,
                chart: "system.ram".to_string(),
                max: Some(100.0)
            }
        );
    }

    #[test]
    fn ping_splits_hosts() {
        let query: InspectQuery = InspectQuery::from_event(
            &event(&[("type", "ping"), ("hosts", "10.0.0.1, router ,"), ("trycount", "5")]),
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            query,
            InspectQuery::Ping {
                width: 640,
                height: 480,
                hosts: vec!["10.0.0.1".to_string(), "router".to_string()],
                try_count: 5
            }
        );
    }

    #[test]
    fn bad_queries_are_rejected() {
        assert!(InspectQuery::from_event(&event(&[("type", "ping")]), &defaults()).is_err());
        assert!(InspectQuery::from_event(&event(&[("type", "disk")]), &defaults()).is_err());
        assert!(InspectQuery::from_event(&event(&[]), &defaults()).is_err());
        assert!(
            InspectQuery::from_event(&event(&[("type", "memory"), ("width", "wide")]), &defaults())
                .is_err()
        );
    }

    #[test]
    fn canvas_is_checked_before_any_source_runs() {
        for (width, height) in [("0", "480"), ("5000", "480"), ("640", "0")] {
            let err: anyhow::Error = InspectQuery::from_event(
                &event(&[("type", "ping"), ("hosts", "a"), ("width", width), ("height", height)]),
                &defaults(),
            )
            .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ChartError>(),
                Some(ChartError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn ping_fan_out_is_bounded() {
        let huge_try_count = InspectQuery::from_event(
            &event(&[("type", "ping"), ("hosts", "a"), ("trycount", "4294967295")]),
            &defaults(),
        );
        assert!(huge_try_count.unwrap_err().to_string().contains("trycount"));

        let zero_try_count = InspectQuery::from_event(
            &event(&[("type", "ping"), ("hosts", "a"), ("trycount", "0")]),
            &defaults(),
        );
        assert!(zero_try_count.is_err());

        let too_many_hosts = InspectQuery::from_event(
            &event(&[("type", "ping"), ("hosts", "a,b,c,d,e")]),
            &defaults(),
        );
        assert!(too_many_hosts.unwrap_err().to_string().contains("hosts"));

        let at_limit = InspectQuery::from_event(
            &event(&[("type", "ping"), ("hosts", "a,b,c,d"), ("trycount", "10")]),
            &defaults(),
        );
        assert!(at_limit.is_ok());
    }
}
