// ==========================================
// 排班生成系统 - 多阶段贪心分配引擎
// ==========================================
// 职责: 按日、按阶段顺序为成员分配班次
// 输入: 成员 + 需求 + 申请 + 公休配额规划结果
// 输出: 每个成员每个日期一个标签
// ==========================================
// 每日阶段:
// A) 强制确定（希望休 / 预留休 / 不可出勤 / 连续出勤上限）
// B) 技能组配额充足
// C) 剩余班次需求充足
// D) 预留扩展点（无行为，剩余不足保持不足）
// 收尾) 未分配候选者 → 休；希望出勤达成 → ◎标记
// ==========================================

mod day;
mod greedy;


pub use day::DayOutcome;
pub use greedy::GreedyAssignmentEngine;
