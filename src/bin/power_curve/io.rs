use anyhow::Result;
use coinpower_utils::power::PowerPoint;
use csv::WriterBuilder;
use log::debug;
use std::path::Path;

/// Write power points as a tab separated file with a header row
pub fn write_power_curve(path: &Path, points: &[PowerPoint]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    debug!("Wrote {} power points to {}", points.len(), path.display());
    Ok(())
}

/// Write, per bias, the trial counts after which power drops
pub fn write_power_drops(path: &Path, drops: &[(f64, Vec<u64>)]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    writer.write_record(&["bias", "n_drops", "n_trials"])?;
    for (bias, trials) in drops {
        let joined = trials
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writer.write_record(&[bias.to_string(), trials.len().to_string(), joined])?;
    }
    writer.flush()?;
    Ok(())
}
