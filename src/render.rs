//! Plain-text layout of view models for the terminal.

use std::io::{self, Write};

use crate::decimal::percent;
use crate::engine::{ChartPoint, QoQPoint, ViewModel};
use crate::model::{SentimentSnapshot, TranscriptEntry, TranscriptRecord};

pub fn write_overview<W: Write>(
    out: &mut W,
    entity: &str,
    view: &ViewModel<'_>,
) -> io::Result<()> {
    writeln!(out, "Earnings call analysis: {}", entity.to_uppercase())?;
    writeln!(out, "Quarter: {}", view.quarter)?;
    writeln!(out)?;
    writeln!(out, "Management tone: {}", view.management_tone.category.as_str())?;
    writeln!(out, "Q&A tone:        {}", view.qa_tone.category.as_str())?;
    writeln!(out)?;
    write_snapshot(out, "Management", view.management())?;
    write_snapshot(out, "Q&A", view.qa())?;
    writeln!(out)?;

    writeln!(out, "Strategic focus areas:")?;
    if view.strategic_focuses.is_empty() {
        writeln!(out, "\tNo strategic focuses reported for this quarter")?;
    } else {
        for focus in view.strategic_focuses {
            writeln!(out, "\t- {focus}")?;
        }
    }
    Ok(())
}

fn write_snapshot<W: Write>(
    out: &mut W,
    channel: &str,
    snapshot: &SentimentSnapshot,
) -> io::Result<()> {
    writeln!(
        out,
        "{channel:<11} positive={}% neutral={}% negative={}%",
        percent(snapshot.positive_avg),
        percent(snapshot.neutral_avg),
        percent(snapshot.negative_avg),
    )
}

pub fn write_analysis<W: Write>(
    out: &mut W,
    chart: &[ChartPoint],
    qoq: &[QoQPoint],
) -> io::Result<()> {
    writeln!(out, "Sentiment trends (%)")?;
    writeln!(out, "quarter\tmgmt_pos\tqa_pos\tmgmt_neu\tqa_neu\tmgmt_neg\tqa_neg")?;
    for point in chart {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            point.quarter,
            point.management_pos,
            point.qa_pos,
            point.management_neu,
            point.qa_neu,
            point.management_neg,
            point.qa_neg,
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Quarter-over-quarter tone changes")?;
    if qoq.is_empty() {
        writeln!(out, "\t(no transitions)")?;
        return Ok(());
    }
    writeln!(out, "label\tperiod\tmanagement\tqa")?;
    for point in qoq {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            point.label, point.full_label, point.management_delta, point.qa_delta
        )?;
    }
    Ok(())
}

pub fn write_transcript<W: Write>(
    out: &mut W,
    quarter: &str,
    record: Option<&TranscriptRecord>,
) -> io::Result<()> {
    let Some(record) = record else {
        writeln!(out, "No transcript available for {quarter}")?;
        return Ok(());
    };

    writeln!(out, "Earnings Call - {}", record.date)?;
    writeln!(out)?;
    write_section(out, "Prepared Remarks", &record.prepared_remarks)?;
    write_section(out, "Q&A Session", &record.qanda)
}

fn write_section<W: Write>(
    out: &mut W,
    title: &str,
    entries: &[TranscriptEntry],
) -> io::Result<()> {
    writeln!(out, "== {title} ==")?;
    for entry in entries {
        writeln!(out, "{}:", entry.speaker)?;
        writeln!(out, "\t{}", entry.text)?;
    }
    writeln!(out)
}
