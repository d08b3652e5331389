//! Lazy search over the student table

use crate::records::Student;
use std::iter::Enumerate;
use std::slice::Iter;

/// Iterator over `(position, record)` pairs whose name or registration
/// number contains the query (case-sensitive)
///
/// Nothing is evaluated until the iterator is advanced. Clone it to run
/// the same search again from the start.
#[derive(Debug, Clone)]
pub struct Search<'a> {
    rows: Enumerate<Iter<'a, Student>>,
    query: &'a str,
}

impl<'a> Search<'a> {
    pub(crate) fn new(students: &'a [Student], query: &'a str) -> Self {
        Self {
            rows: students.iter().enumerate(),
            query,
        }
    }

    /// The query this search filters by
    pub fn query(&self) -> &'a str {
        self.query
    }
}

impl<'a> Iterator for Search<'a> {
    type Item = (usize, &'a Student);

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query;
        self.rows.find(|(_, student)| student.matches(query))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.rows.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{initial_subject_names, RecordId, StudentFields};

    fn table() -> Vec<Student> {
        let names = initial_subject_names();
        [("Anna", "R100"), ("Bob", "R200"), ("Carl", "ANN001")]
            .iter()
            .enumerate()
            .map(|(i, (name, reg))| {
                Student::new(
                    RecordId::new(i as u32 + 1),
                    StudentFields::new(*name, *reg),
                    &names,
                )
            })
            .collect()
    }

    #[test]
    fn test_search_by_name_and_reg_num() {
        let table = table();
        let hits: Vec<usize> = Search::new(&table, "R").map(|(pos, _)| pos).collect();
        assert_eq!(hits, vec![0, 1]);

        let hits: Vec<usize> = Search::new(&table, "ANN").map(|(pos, _)| pos).collect();
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn test_empty_query_yields_everything_in_order() {
        let table = table();
        let names: Vec<&str> = Search::new(&table, "")
            .map(|(_, s)| s.profile.name.as_str())
            .collect();
        assert_eq!(names, vec!["Anna", "Bob", "Carl"]);
    }

    #[test]
    fn test_clone_restarts() {
        let table = table();
        let mut search = Search::new(&table, "o");
        let fresh = search.clone();
        assert_eq!(search.next().map(|(pos, _)| pos), Some(1));
        assert_eq!(search.next(), None);
        assert_eq!(fresh.count(), 1);
    }
}
