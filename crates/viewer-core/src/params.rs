use crate::config::ParamDefaults;

/// The two values the page URL selects a job output with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub job_id: String,
    pub filebase: String,
}

impl QueryParams {
    /// Reads `job_id` and `filebase` from a `location.search` string.
    ///
    /// The first occurrence of a key wins. A missing or empty value falls
    /// back to the configured default.
    pub fn from_query(search: &str, defaults: &ParamDefaults) -> Self {
        let mut job_id = None;
        let mut filebase = None;

        for (key, value) in pairs(search) {
            let slot = match key.as_str() {
                "job_id" => &mut job_id,
                "filebase" => &mut filebase,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            job_id: non_empty_or(job_id, &defaults.job_id),
            filebase: non_empty_or(filebase, &defaults.filebase),
        }
    }

    /// `{filebase}-{job_id}.json`, verbatim.
    pub fn geojson_filename(&self) -> String {
        format!("{}-{}.json", self.filebase, self.job_id)
    }

    /// Path of the job output relative to the page, e.g.
    /// `download/out/units_gridded-dummy.json`.
    pub fn resource_path(&self, prefix: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return self.geojson_filename();
        }
        format!("{prefix}/{}", self.geojson_filename())
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::from_query("", &ParamDefaults::default())
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

fn pairs(search: &str) -> impl Iterator<Item = (String, String)> + '_ {
    search
        .strip_prefix('?')
        .unwrap_or(search)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
