use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::entities::Class;
use crate::models::students::entities::Student;

/// 成绩权重（百分比，三者之和为 100）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct WeightConfig {
    pub mid_weight: f64,
    pub class_weight: f64,
    pub exam_weight: f64,
}

impl WeightConfig {
    pub fn new(mid_weight: f64, class_weight: f64, exam_weight: f64) -> Self {
        Self {
            mid_weight,
            class_weight,
            exam_weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.mid_weight + self.class_weight + self.exam_weight
    }

    /// 权重非负且和为 100（容差 0.01）
    pub fn validate(&self) -> Result<(), String> {
        if self.mid_weight < 0.0 || self.class_weight < 0.0 || self.exam_weight < 0.0 {
            return Err("Weights must not be negative".to_string());
        }
        if (self.sum() - 100.0).abs() > 0.01 {
            return Err(format!("Weights must sum to 100, got {}", self.sum()));
        }
        Ok(())
    }
}

impl From<&crate::config::DefaultWeights> for WeightConfig {
    fn from(w: &crate::config::DefaultWeights) -> Self {
        Self::new(w.mid_weight, w.class_weight, w.exam_weight)
    }
}

// 等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn remark(&self) -> &'static str {
        match self {
            LetterGrade::A => "Excellent",
            LetterGrade::B => "Very Good",
            LetterGrade::C => "Good",
            LetterGrade::D => "Fair",
            LetterGrade::F => "Needs Improvement",
        }
    }

    pub fn gpa_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(s)
    }
}

// 单科加权成绩
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SubjectGrade {
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub credits: f64,
    pub midterm_total: f64,
    pub class_score_total: f64,
    pub exam_score_total: f64,
    pub class_score_pct: f64,
    pub exam_score_pct: f64,
    pub total_score: f64,
    pub grade: LetterGrade,
    pub remark: String,
    pub gpa: f64,
}

// 学生成绩单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Transcript {
    pub success: bool,
    pub message: String,
    pub student: Student,
    pub term: String,
    pub academic_year: String,
    pub weights: WeightConfig,
    pub subjects: Vec<SubjectGrade>,
    pub total_credits: f64,
    pub cumulative_gpa: f64,
    pub average_score: f64,
}

// 班级成绩总表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassReportRow {
    pub student_id: i64,
    pub admission_number: String,
    pub student_name: String,
    pub subjects: Vec<SubjectGrade>,
    pub average_score: f64,
    pub gpa: f64,
    // 按 GPA 排名，GPA 相同名次相同；无成绩的学生为 None
    pub position: Option<i64>,
}

// 班级成绩总表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassReport {
    pub class: Class,
    pub term: String,
    pub academic_year: String,
    pub weights: WeightConfig,
    pub rows: Vec<ClassReportRow>,
}
