pub mod stage1_normalize;
pub mod stage2_decide;
pub mod stage3_evaluate;
pub mod stage4_render;
pub mod stage5_report;
