use std::path::Path;

use crate::model::{CheckMode, CheckReport, EnvMap, Requirement};

/// The actual env file handed to [`compare`].
#[derive(Debug, Clone, Copy)]
pub enum Actual<'a> {
    Loaded(&'a EnvMap),
    /// The file at this path does not exist.
    NotFound(&'a Path),
}

impl<'a> From<&'a EnvMap> for Actual<'a> {
    fn from(value: &'a EnvMap) -> Self {
        Self::Loaded(value)
    }
}

/// Classify the keys of `actual` against an optional `template`.
///
/// Without a template every actual key is reported as `present` or `empty`
/// depending on its value. With a template, template keys are split into
/// `missing`, `empty` (required but blank) and `present`, and actual-only keys
/// are reported as `extra`. Only [`CheckMode::Strict`] turns missing or empty
/// keys into an invalid report.
pub fn compare(actual: Actual<'_>, template: Option<&EnvMap>, mode: CheckMode) -> CheckReport {
    let actual = match actual {
        Actual::Loaded(map) => map,
        Actual::NotFound(path) => return CheckReport::not_found(path),
    };

    let mut report = CheckReport {
        valid: true,
        ..CheckReport::default()
    };

    match template {
        Some(template) => classify_against_template(actual, template, &mut report),
        None => classify_single(actual, &mut report),
    }

    if mode.is_strict() && (!report.missing.is_empty() || !report.empty.is_empty()) {
        report.valid = false;
    }

    report
}

fn classify_against_template(actual: &EnvMap, template: &EnvMap, report: &mut CheckReport) {
    report.total = template.len();

    for (key, expected) in template.iter() {
        match actual.get(key) {
            None => report.missing.push(key.to_owned()),
            Some("") if Requirement::from_template_value(expected) == Requirement::Required => {
                report.empty.push(key.to_owned());
            }
            Some(_) => report.present.push(key.to_owned()),
        }
    }

    report.extra.extend(
        actual
            .keys()
            .filter(|key| !template.contains_key(key))
            .map(str::to_owned),
    );
}

fn classify_single(actual: &EnvMap, report: &mut CheckReport) {
    report.total = actual.len();

    for (key, value) in actual.iter() {
        if value.is_empty() {
            report.empty.push(key.to_owned());
        } else {
            report.present.push(key.to_owned());
        }
    }
}
