use crate::domain::model::FleetReport;
use crate::utils::error::{GateError, Result};

pub fn render_text(report: &FleetReport) -> String {
    let mut lines = vec![format!("{:<12} {:>8} {:>8}", "DEVICE", "STATUS", "ENABLED")];

    for r in &report.devices {
        let status = match (r.code, &r.error) {
            (Some(code), _) => code.0.to_string(),
            (None, Some(e)) => format!("error: {}", e),
            (None, None) => "-".to_string(),
        };
        let enabled = if r.enabled { "yes" } else { "no" };
        lines.push(format!("{:<12} {:>8} {:>8}", r.device, status, enabled));
    }

    lines.push(String::new());
    lines.push(format!(
        "checked={} enabled={} disabled={} failed={}",
        report.checked, report.enabled, report.disabled, report.failed
    ));
    lines.join("\n")
}

pub fn render_json(report: &FleetReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_csv(report: &FleetReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["device", "status", "enabled", "error"])?;

    for r in &report.devices {
        wtr.write_record([
            r.device.to_string(),
            r.code.map(|c| c.0.to_string()).unwrap_or_default(),
            r.enabled.to_string(),
            r.error.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| GateError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeviceId, DeviceReport, StatusCode};

    fn sample_report() -> FleetReport {
        FleetReport::from_devices(vec![
            DeviceReport::resolved(DeviceId(1337), StatusCode(0)),
            DeviceReport::resolved(DeviceId(2001), StatusCode(4)),
            DeviceReport::failed(DeviceId(3005), "connection refused".to_string()),
        ])
    }

    #[test]
    fn text_output_lists_devices_and_totals() {
        let text = render_text(&sample_report());

        assert!(text.contains("DEVICE"));
        assert!(text.contains("1337"));
        assert!(text.contains("yes"));
        assert!(text.contains("error: connection refused"));
        assert!(text.contains("checked=3 enabled=1 disabled=1 failed=1"));
    }

    #[test]
    fn json_output_is_parseable_and_complete() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["checked"], 3);
        assert_eq!(value["enabled"], 1);
        assert_eq!(value["devices"].as_array().unwrap().len(), 3);
        assert_eq!(value["devices"][0]["device"], 1337);
        assert_eq!(value["devices"][0]["enabled"], true);
    }

    #[test]
    fn csv_output_has_header_and_one_row_per_device() {
        let csv = render_csv(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.trim_end().split('\n').collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "device,status,enabled,error");
        assert_eq!(lines[1], "1337,0,true,");
        assert_eq!(lines[2], "2001,4,false,");
        assert!(lines[3].starts_with("3005,,false,"));
    }
}
