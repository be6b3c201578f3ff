use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Vocabularies – ordered label sets for the survey questions
// ---------------------------------------------------------------------------

/// The two answer scales used by the survey questions on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Satisfaction,
    Agreement,
}

const SATISFACTION_LABELS: [&str; 4] = [
    "very satisfied",
    "mod. satisfied",
    "a little dissat",
    "very dissatisfied",
];

const AGREEMENT_LABELS: [&str; 4] = ["strongly agree", "agree", "disagree", "strongly disagree"];

impl Vocabulary {
    /// Labels in display order; index 0 is the most positive answer.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Vocabulary::Satisfaction => &SATISFACTION_LABELS,
            Vocabulary::Agreement => &AGREEMENT_LABELS,
        }
    }

    /// Display rank of a label, `None` if the label is not in this vocabulary.
    pub fn rank(self, label: &str) -> Option<usize> {
        self.labels().iter().position(|l| *l == label)
    }
}

// ---------------------------------------------------------------------------
// Response columns – the six survey questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResponseColumn {
    Satjob,
    Relationship,
    MaleBreadwinner,
    MenBettersuited,
    ChildSuffer,
    MenOverwork,
}

impl ResponseColumn {
    pub const ALL: [ResponseColumn; 6] = [
        ResponseColumn::Satjob,
        ResponseColumn::Relationship,
        ResponseColumn::MaleBreadwinner,
        ResponseColumn::MenBettersuited,
        ResponseColumn::ChildSuffer,
        ResponseColumn::MenOverwork,
    ];

    /// Column name in the cleaned dataset.
    pub fn name(self) -> &'static str {
        match self {
            ResponseColumn::Satjob => "satjob",
            ResponseColumn::Relationship => "relationship",
            ResponseColumn::MaleBreadwinner => "male_breadwinner",
            ResponseColumn::MenBettersuited => "men_bettersuited",
            ResponseColumn::ChildSuffer => "child_suffer",
            ResponseColumn::MenOverwork => "men_overwork",
        }
    }

    /// Question wording shown in the dropdown.
    pub fn question(self) -> &'static str {
        match self {
            ResponseColumn::Satjob => "On the whole, how satisfied are you with the work you do?",
            ResponseColumn::Relationship => {
                "A working mother can establish just as warm and secure a relationship with her \
                 children as a mother who does not work."
            }
            ResponseColumn::MaleBreadwinner => {
                "It is much better for everyone involved if the man is the achiever outside the \
                 home and the woman takes care of the home and family."
            }
            ResponseColumn::MenBettersuited => {
                "Most men are better suited emotionally for politics than are most women."
            }
            ResponseColumn::ChildSuffer => {
                "A preschool child is likely to suffer if his or her mother works."
            }
            ResponseColumn::MenOverwork => {
                "Family life often suffers because men concentrate too much on their work."
            }
        }
    }

    /// Which answer scale this question uses.
    pub fn vocabulary(self) -> Vocabulary {
        match self {
            ResponseColumn::Satjob => Vocabulary::Satisfaction,
            _ => Vocabulary::Agreement,
        }
    }
}

impl fmt::Display for ResponseColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseColumn::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DashboardError::InvalidSelection {
                column: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Grouping columns – demographic partitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupingColumn {
    Sex,
    Region,
    Education,
}

impl GroupingColumn {
    pub const ALL: [GroupingColumn; 3] = [
        GroupingColumn::Sex,
        GroupingColumn::Region,
        GroupingColumn::Education,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GroupingColumn::Sex => "sex",
            GroupingColumn::Region => "region",
            GroupingColumn::Education => "education",
        }
    }
}

impl fmt::Display for GroupingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupingColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupingColumn::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DashboardError::InvalidSelection {
                column: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Selection – the (question, grouping) pair driving the bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub response: ResponseColumn,
    pub grouping: GroupingColumn,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            response: ResponseColumn::Satjob,
            grouping: GroupingColumn::Sex,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' grouped by '{}'", self.response, self.grouping)
    }
}

impl Selection {
    pub fn new(response: ResponseColumn, grouping: GroupingColumn) -> Self {
        Selection { response, grouping }
    }

    /// Validate a pair of raw column names.
    pub fn parse(response: &str, grouping: &str) -> Result<Self, DashboardError> {
        Ok(Selection {
            response: response.parse()?,
            grouping: grouping.parse()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Numeric columns used by the summary views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    JobPrestige,
    Income,
    SocioeconomicIndex,
    Education,
}

impl NumericColumn {
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::JobPrestige => "job_prestige",
            NumericColumn::Income => "income",
            NumericColumn::SocioeconomicIndex => "socioeconomic_index",
            NumericColumn::Education => "education",
        }
    }

    /// Axis / table label.
    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::JobPrestige => "Job Prestige",
            NumericColumn::Income => "Annual Income",
            NumericColumn::SocioeconomicIndex => "Socioeconomic Index",
            NumericColumn::Education => "Education",
        }
    }
}
