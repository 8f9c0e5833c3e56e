use super::*;

/// A billing partition resolved from the catalog.
///
/// There is no public constructor: a `Table` only comes out of [`latest`],
/// so its name always matched `t_<schema>_<digits>` in the live catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Schema,
    name: String,
    suffix: u64,
}

impl Table {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn suffix(&self) -> u64 {
        self.suffix
    }
    /// `"schema"."table"`, ready to splice into SQL.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema.quoted(), schema::quote(&self.name))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Picks the partition with the largest numeric suffix.
///
/// Names that do not match `t_<schema>_<digits>` are ignored. Suffixes
/// compare as integers, so `t_PPI_10` beats `t_PPI_9`. Equal values
/// (`t_PPI_01` vs `t_PPI_1`) fall back to the greater name.
pub fn latest<I>(schema: &Schema, names: I) -> Result<Option<Table>, QueryError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut best: Option<Table> = None;
    for name in names.into_iter().map(Into::into) {
        let Some(digits) = schema.suffix(&name) else {
            continue;
        };
        let suffix = digits
            .parse::<u64>()
            .map_err(|_| QueryError::SuffixOverflow { table: name.clone() })?;
        let better = best
            .as_ref()
            .map_or(true, |b| (suffix, name.as_str()) > (b.suffix, b.name.as_str()));
        if better {
            best = Some(Table {
                schema: schema.clone(),
                name,
                suffix,
            });
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppi() -> Schema {
        Schema::try_from("PPI").unwrap()
    }

    #[test]
    fn empty_catalog_has_no_latest() {
        assert_eq!(latest(&ppi(), Vec::<String>::new()), Ok(None));
        assert_eq!(latest(&ppi(), ["users", "t_GAZ_4"]), Ok(None));
    }

    #[test]
    fn numeric_not_lexicographic() {
        let table = latest(&ppi(), ["t_PPI_3", "t_PPI_10", "t_PPI_2"])
            .unwrap()
            .unwrap();
        assert_eq!(table.name(), "t_PPI_10");
        assert_eq!(table.suffix(), 10);
    }

    #[test]
    fn nonconforming_names_are_excluded() {
        let table = latest(
            &ppi(),
            ["t_PPI_abc", "t_PPI_3x", "t_PPI_1", "t_PPI_99_old", "xt_PPI_50", "t_ppi_40"],
        )
        .unwrap()
        .unwrap();
        assert_eq!(table.name(), "t_PPI_1");
        assert_eq!(latest(&ppi(), ["t_PPI_abc", "t_PPI_3x"]), Ok(None));
    }

    #[test]
    fn padded_suffixes_compare_by_value() {
        let table = latest(&ppi(), ["t_PPI_009", "t_PPI_10"]).unwrap().unwrap();
        assert_eq!(table.name(), "t_PPI_10");
        let table = latest(&ppi(), ["t_PPI_1", "t_PPI_01"]).unwrap().unwrap();
        assert_eq!(table.suffix(), 1);
        assert_eq!(table.name(), "t_PPI_1");
        let table = latest(&ppi(), ["t_PPI_01", "t_PPI_1"]).unwrap().unwrap();
        assert_eq!(table.name(), "t_PPI_1");
    }

    #[test]
    fn overflowing_suffix_fails() {
        let huge = format!("t_PPI_{}0", u64::MAX);
        assert_eq!(
            latest(&ppi(), ["t_PPI_1".to_string(), huge.clone()]),
            Err(QueryError::SuffixOverflow { table: huge })
        );
        let max = format!("t_PPI_{}", u64::MAX);
        let table = latest(&ppi(), [max.clone()]).unwrap().unwrap();
        assert_eq!(table.name(), max);
    }

    #[test]
    fn qualified_name_is_quoted() {
        let table = latest(&ppi(), ["t_PPI_2"]).unwrap().unwrap();
        assert_eq!(table.qualified(), "\"PPI\".\"t_PPI_2\"");
        assert_eq!(table.to_string(), "PPI.t_PPI_2");
    }
}
