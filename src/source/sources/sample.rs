use crate::constants::sources::SAMPLE_SOURCE_ID;
use crate::data::RawRow;
use crate::errors::DashboardError;
use crate::source::{RowSource, read_csv_rows};

/// Bundled 28-row sample dataset (IMDb-style columns, revenue in raw units).
pub const SAMPLE_CSV: &str = "\
title,year,genres,rating,votes,revenue,runtime\n\
The Shawshank Redemption,1994,Drama,9.3,2700000,28341469,142\n\
The Godfather,1972,Crime|Drama,9.2,1900000,134966411,175\n\
The Dark Knight,2008,Action|Crime|Drama,9.0,2700000,1004558444,152\n\
12 Angry Men,1957,Crime|Drama,9.0,900000,4360000,96\n\
Schindler's List,1993,Biography|Drama|History,9.0,1400000,322161245,195\n\
Pulp Fiction,1994,Crime|Drama,8.9,2100000,213928762,154\n\
Inception,2010,Action|Adventure|Sci-Fi,8.8,2400000,836836967,148\n\
Fight Club,1999,Drama,8.8,2000000,101209702,139\n\
Forrest Gump,1994,Drama|Romance,8.8,2200000,678200000,142\n\
The Matrix,1999,Action|Sci-Fi,8.7,1900000,463517383,136\n\
3 Idiots,2009,Comedy|Drama|Bollywood,8.4,400000,85000000,170\n\
Dangal,2016,Biography|Drama|Sport|Bollywood,8.4,200000,301000000,161\n\
PK,2014,Comedy|Drama|Sci-Fi|Bollywood,8.1,190000,140000000,153\n\
Bajrangi Bhaijaan,2015,Adventure|Comedy|Drama|Bollywood,8.0,120000,150000000,159\n\
Gully Boy,2019,Drama|Music|Bollywood,7.9,80000,35000000,154\n\
Andhadhun,2018,Crime|Thriller|Bollywood,8.2,130000,45000000,139\n\
Lagaan,2001,Adventure|Drama|Sport|Bollywood,8.1,110000,39200000,224\n\
Taare Zameen Par,2007,Drama|Family|Bollywood,8.3,180000,28000000,165\n\
Drishyam,2015,Crime|Drama|Thriller|Bollywood,8.2,150000,30000000,163\n\
Baahubali: The Beginning,2015,Action|Drama|Fantasy|Tollywood,8.0,120000,100000000,159\n\
Baahubali 2: The Conclusion,2017,Action|Drama|Fantasy|Tollywood,8.2,160000,275000000,171\n\
RRR,2022,Action|Drama|Tollywood,8.0,240000,155000000,187\n\
Pushpa: The Rise,2021,Action|Crime|Drama|Tollywood,7.6,90000,155000000,179\n\
Arjun Reddy,2017,Drama|Romance|Tollywood,8.0,88000,12000000,186\n\
Jersey,2019,Drama|Sport|Tollywood,7.9,45000,10000000,157\n\
Ala Vaikunthapurramuloo,2020,Action|Comedy|Drama|Tollywood,7.3,42000,28000000,165\n\
Mahanati,2018,Biography|Drama|Tollywood,8.2,38000,15000000,177\n\
Eega,2012,Action|Fantasy|Thriller|Tollywood,7.7,55000,12000000,145
";

/// Row source over the bundled sample dataset.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleSource;

impl RowSource for SampleSource {
    fn id(&self) -> &str {
        SAMPLE_SOURCE_ID
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, DashboardError> {
        read_csv_rows(SAMPLE_SOURCE_ID, SAMPLE_CSV.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn sample_has_twenty_eight_rows_with_expected_columns() {
        let rows = SampleSource.read_rows().unwrap();
        assert_eq!(rows.len(), 28);
        assert_eq!(
            rows[0].field_names().collect::<Vec<_>>(),
            vec!["title", "year", "genres", "rating", "votes", "revenue", "runtime"]
        );
        assert_eq!(
            rows[0].get("title"),
            Some(&Value::from("The Shawshank Redemption"))
        );
        assert_eq!(rows[27].get("title"), Some(&Value::from("Eega")));
    }
}
