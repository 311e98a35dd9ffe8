// Standings output: CSV export and the plain-text table the driver prints.

use std::io;

use crate::standings::table::TableRow;

/// Column header matching the league site's spreadsheet export.
const CSV_HEADER: [&str; 11] = [
    "Position", "Lag", "GP", "W", "OTW", "OTL", "L", "GF", "GA", "+/-", "Pts",
];

/// Write the ranked table as CSV.
pub fn write_csv<W: io::Write>(rows: &[TableRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        let r = &row.record;
        wtr.write_record(&[
            row.position.to_string(),
            row.team_name.clone(),
            r.games_played.to_string(),
            r.wins.to_string(),
            r.overtime_wins.to_string(),
            r.overtime_losses.to_string(),
            r.losses.to_string(),
            r.goals_for.to_string(),
            r.goals_against.to_string(),
            row.goal_difference.to_string(),
            r.points.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the ranked table as fixed-width text.
pub fn format_table(rows: &[TableRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<24}{:>4}{:>4}{:>5}{:>5}{:>4}{:>5}{:>5}{:>5}{:>5}\n",
        "#", "Lag", "GP", "W", "OTW", "OTL", "L", "GF", "GA", "+/-", "Pts"
    ));
    for row in rows {
        let r = &row.record;
        out.push_str(&format!(
            "{:>3}  {:<24}{:>4}{:>4}{:>5}{:>5}{:>4}{:>5}{:>5}{:>5}{:>5}\n",
            row.position,
            row.team_name,
            r.games_played,
            r.wins,
            r.overtime_wins,
            r.overtime_losses,
            r.losses,
            r.goals_for,
            r.goals_against,
            row.goal_difference,
            r.points
        ));
    }
    out
}
