//! 加权成绩计算
//!
//! 纯函数，不访问存储；权重由调用方传入。

use std::collections::HashMap;

use crate::models::grades::entities::{ClassReportRow, LetterGrade, SubjectGrade, WeightConfig};
use crate::models::marks::entities::{MarkComponent, MarkRecord};
use crate::models::subjects::entities::Subject;

/// 某学生某科目三个组成部分的原始成绩（百分制）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawTotals {
    pub midterm: f64,
    pub class_score: f64,
    pub exam: f64,
}

impl RawTotals {
    pub fn new(midterm: f64, class_score: f64, exam: f64) -> Self {
        Self {
            midterm,
            class_score,
            exam,
        }
    }

    /// 三项全为 0 视为没有成绩
    pub fn is_empty(&self) -> bool {
        self.midterm == 0.0 && self.class_score == 0.0 && self.exam == 0.0
    }

    fn set(&mut self, component: MarkComponent, value: f64) {
        match component {
            MarkComponent::Midterm => self.midterm = value,
            MarkComponent::ClassScore => self.class_score = value,
            MarkComponent::Exam => self.exam = value,
        }
    }
}

pub fn class_score_pct(raw: &RawTotals, weights: &WeightConfig) -> f64 {
    raw.midterm * weights.mid_weight / 100.0 + raw.class_score * weights.class_weight / 100.0
}

pub fn exam_score_pct(raw: &RawTotals, weights: &WeightConfig) -> f64 {
    raw.exam * weights.exam_weight / 100.0
}

/// 总分保留两位小数，定级前先取整以消除浮点误差
pub fn total_score(raw: &RawTotals, weights: &WeightConfig) -> f64 {
    round2(class_score_pct(raw, weights) + exam_score_pct(raw, weights))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 下界包含：80.00 为 A，79.999 为 B
pub fn letter_grade(total: f64) -> LetterGrade {
    if total >= 80.0 {
        LetterGrade::A
    } else if total >= 70.0 {
        LetterGrade::B
    } else if total >= 60.0 {
        LetterGrade::C
    } else if total >= 50.0 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

/// 计算单科成绩；三项全为 0 时返回 None
pub fn grade_subject(
    subject: &Subject,
    raw: &RawTotals,
    weights: &WeightConfig,
) -> Option<SubjectGrade> {
    if raw.is_empty() {
        return None;
    }
    let class_pct = class_score_pct(raw, weights);
    let exam_pct = exam_score_pct(raw, weights);
    let total = round2(class_pct + exam_pct);
    let grade = letter_grade(total);

    Some(SubjectGrade {
        subject_id: subject.id,
        subject_name: subject.name.clone(),
        subject_code: subject.code.clone(),
        credits: subject.credits,
        midterm_total: raw.midterm,
        class_score_total: raw.class_score,
        exam_score_total: raw.exam,
        class_score_pct: class_pct,
        exam_score_pct: exam_pct,
        total_score: total,
        grade,
        remark: grade.remark().to_string(),
        gpa: grade.gpa_points(),
    })
}

/// 按学分加权的累计 GPA，没有科目时为 0
pub fn cumulative_gpa(grades: &[SubjectGrade]) -> f64 {
    let credits = total_credits(grades);
    if credits <= 0.0 {
        return 0.0;
    }
    grades.iter().map(|g| g.gpa * g.credits).sum::<f64>() / credits
}

pub fn total_credits(grades: &[SubjectGrade]) -> f64 {
    grades.iter().map(|g| g.credits).sum()
}

pub fn average_score(grades: &[SubjectGrade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().map(|g| g.total_score).sum::<f64>() / grades.len() as f64
}

/// 按 (学生, 科目) 归并原始成绩
///
/// 同一组成部分在多个班级下都有记录时（学生转班），取最近更新的一条，与查询返回顺序无关。
pub fn collect_raw_totals(marks: &[MarkRecord]) -> HashMap<(i64, i64), RawTotals> {
    let mut ordered: Vec<&MarkRecord> = marks.iter().collect();
    ordered.sort_by_key(|mark| (mark.updated_at, mark.id));

    let mut totals: HashMap<(i64, i64), RawTotals> = HashMap::new();
    for mark in ordered {
        totals
            .entry((mark.student_id, mark.subject_id))
            .or_default()
            .set(mark.component, mark.total_marks);
    }
    totals
}

/// 计算某学生全部科目的成绩，按科目列表顺序输出
pub fn grade_student(
    student_id: i64,
    subjects: &[Subject],
    totals: &HashMap<(i64, i64), RawTotals>,
    weights: &WeightConfig,
) -> Vec<SubjectGrade> {
    subjects
        .iter()
        .filter_map(|subject| {
            totals
                .get(&(student_id, subject.id))
                .and_then(|raw| grade_subject(subject, raw, weights))
        })
        .collect()
}

/// 按 GPA 降序排名，并列同名次（1, 2, 2, 4）；没有成绩的学生不参与排名，排在最后
pub fn rank_by_gpa(rows: &mut [ClassReportRow]) {
    rows.sort_by(|a, b| {
        let a_key = (a.subjects.is_empty(), -a.gpa);
        let b_key = (b.subjects.is_empty(), -b.gpa);
        a_key
            .partial_cmp(&b_key)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.student_name.cmp(&b.student_name))
    });

    let mut previous: Option<f64> = None;
    let mut position = 0;
    for (index, row) in rows.iter_mut().enumerate() {
        if row.subjects.is_empty() {
            row.position = None;
            continue;
        }
        if previous != Some(row.gpa) {
            position = index as i64 + 1;
            previous = Some(row.gpa);
        }
        row.position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: i64, credits: f64) -> Subject {
        Subject {
            id,
            name: format!("Subject {id}"),
            code: format!("S{id}"),
            credits,
            created_at: chrono::Utc::now(),
        }
    }

    fn default_weights() -> WeightConfig {
        WeightConfig::new(20.0, 20.0, 60.0)
    }

    fn row(student_id: i64, name: &str, gpa: f64, graded: bool) -> ClassReportRow {
        let subjects = if graded {
            let raw = RawTotals::new(90.0, 90.0, 90.0);
            vec![grade_subject(&subject(1, 1.0), &raw, &default_weights()).unwrap()]
        } else {
            Vec::new()
        };
        ClassReportRow {
            student_id,
            admission_number: format!("ADM{student_id}"),
            student_name: name.to_string(),
            subjects,
            average_score: 0.0,
            gpa,
            position: None,
        }
    }

    #[test]
    fn test_total_score_formula() {
        let raw = RawTotals::new(70.0, 80.0, 90.0);
        let w = default_weights();
        assert!((class_score_pct(&raw, &w) - 30.0).abs() < 1e-9);
        assert!((exam_score_pct(&raw, &w) - 54.0).abs() < 1e-9);
        assert!((total_score(&raw, &w) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_rounds_before_grading() {
        let raw = RawTotals::new(0.16, 99.96, 99.96);
        let w = default_weights();
        assert_eq!(total_score(&raw, &w), 80.0);

        let grade = grade_subject(&subject(1, 1.0), &raw, &w).unwrap();
        assert_eq!(grade.total_score, 80.0);
        assert_eq!(grade.grade, LetterGrade::A);
    }

    #[test]
    fn test_letter_grade_thresholds() {
        assert_eq!(letter_grade(80.0), LetterGrade::A);
        assert_eq!(letter_grade(79.999), LetterGrade::B);
        assert_eq!(letter_grade(70.0), LetterGrade::B);
        assert_eq!(letter_grade(69.99), LetterGrade::C);
        assert_eq!(letter_grade(60.0), LetterGrade::C);
        assert_eq!(letter_grade(50.0), LetterGrade::D);
        assert_eq!(letter_grade(49.99), LetterGrade::F);
        assert_eq!(letter_grade(0.0), LetterGrade::F);
    }

    #[test]
    fn test_high_total_is_always_a() {
        let w = default_weights();
        for raw in [
            RawTotals::new(100.0, 100.0, 75.0),
            RawTotals::new(0.0, 100.0, 100.0),
            RawTotals::new(80.0, 80.0, 80.0),
        ] {
            let grade = grade_subject(&subject(1, 1.0), &raw, &w).unwrap();
            assert!(grade.total_score >= 80.0);
            assert_eq!(grade.grade, LetterGrade::A);
            assert_eq!(grade.gpa, 4.0);
            assert_eq!(grade.remark, "Excellent");
        }
    }

    #[test]
    fn test_all_zero_subject_is_skipped() {
        let w = default_weights();
        assert!(grade_subject(&subject(1, 1.0), &RawTotals::default(), &w).is_none());

        let subjects = vec![subject(1, 1.0), subject(2, 1.0), subject(3, 1.0)];
        let mut totals = HashMap::new();
        totals.insert((7, 1), RawTotals::new(60.0, 60.0, 60.0));
        totals.insert((7, 2), RawTotals::default());
        let grades = grade_student(7, &subjects, &totals, &w);
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].subject_id, 1);
    }

    #[test]
    fn test_gpa_is_mean_with_unit_credits() {
        let w = default_weights();
        let grades: Vec<SubjectGrade> = [
            RawTotals::new(90.0, 90.0, 90.0), // A 4.0
            RawTotals::new(75.0, 75.0, 75.0), // B 3.0
            RawTotals::new(40.0, 40.0, 40.0), // F 0.0
        ]
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| grade_subject(&subject(i as i64 + 1, 1.0), raw, &w))
        .collect();
        assert!((cumulative_gpa(&grades) - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(cumulative_gpa(&[]), 0.0);
    }

    #[test]
    fn test_gpa_weighted_by_credits() {
        let w = default_weights();
        let a = grade_subject(&subject(1, 3.0), &RawTotals::new(90.0, 90.0, 90.0), &w).unwrap();
        let f = grade_subject(&subject(2, 1.0), &RawTotals::new(10.0, 10.0, 10.0), &w).unwrap();
        assert!((cumulative_gpa(&[a, f]) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_switch_changes_total_by_exam_minus_midterm() {
        let old = WeightConfig::new(20.0, 20.0, 60.0);
        let new = WeightConfig::new(10.0, 20.0, 70.0);
        for raw in [
            RawTotals::new(55.0, 70.0, 85.0),
            RawTotals::new(90.0, 10.0, 30.0),
            RawTotals::new(0.0, 0.0, 100.0),
        ] {
            let delta = total_score(&raw, &new) - total_score(&raw, &old);
            assert!((delta - (raw.exam - raw.midterm) * 0.10).abs() < 1e-9);
        }
    }

    #[test]
    fn test_collect_raw_totals() {
        let now = chrono::Utc::now();
        let mark = |component, total_marks| MarkRecord {
            id: 0,
            student_id: 1,
            subject_id: 2,
            class_id: 3,
            term: "Term 1".to_string(),
            academic_year: "2025/2026".to_string(),
            component,
            total_marks,
            recorded_by: None,
            created_at: now,
            updated_at: now,
        };
        let totals = collect_raw_totals(&[
            mark(MarkComponent::Midterm, 50.0),
            mark(MarkComponent::Exam, 70.0),
        ]);
        assert_eq!(totals.get(&(1, 2)), Some(&RawTotals::new(50.0, 0.0, 70.0)));
    }

    #[test]
    fn test_collect_raw_totals_prefers_latest_class_record() {
        let earlier = chrono::Utc::now() - chrono::Duration::days(30);
        let later = chrono::Utc::now();
        let exam = |id, class_id, total_marks, updated_at| MarkRecord {
            id,
            student_id: 1,
            subject_id: 2,
            class_id,
            term: "Term 1".to_string(),
            academic_year: "2025/2026".to_string(),
            component: MarkComponent::Exam,
            total_marks,
            recorded_by: None,
            created_at: updated_at,
            updated_at,
        };
        let old_class = exam(10, 3, 40.0, earlier);
        let new_class = exam(11, 4, 85.0, later);

        let forward = collect_raw_totals(&[old_class.clone(), new_class.clone()]);
        let reversed = collect_raw_totals(&[new_class, old_class]);
        assert_eq!(forward.get(&(1, 2)).map(|r| r.exam), Some(85.0));
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_rank_by_gpa_shares_positions() {
        let mut rows = vec![
            row(1, "Ama", 3.0, true),
            row(2, "Kofi", 4.0, true),
            row(3, "Esi", 3.0, true),
            row(4, "Yaw", 0.0, false),
            row(5, "Abena", 2.0, true),
        ];
        rank_by_gpa(&mut rows);
        let positions: Vec<(i64, Option<i64>)> =
            rows.iter().map(|r| (r.student_id, r.position)).collect();
        assert_eq!(
            positions,
            vec![(2, Some(1)), (1, Some(2)), (3, Some(2)), (5, Some(4)), (4, None)]
        );
    }
}
