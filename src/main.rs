// ==========================================
// 预制混凝土质量控制 - 命令行入口
// ==========================================
// 用法:
//   precast-qc <scenario.json> [config.json]
//
// 读取一份检验数据场景，按各模块生成报表并以 JSON 输出到 stdout
// 日志输出到 stderr（RUST_LOG 控制级别，PRECAST_QC_LOG=json 切换 JSON 行格式）
// ==========================================

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::json;

use precast_qc::api::{
    CompactionApi, CubeTestApi, CuringApi, MoistureApi, RawMaterialApi, TensionApi, WeighmentApi,
};
use precast_qc::config::{ConfigManager, QcConfigReader};
use precast_qc::domain::{
    BatchWeighment, CubeResult, CubeSample, CuringCycle, MoistureTest, Reading, ReadingFilter,
    ScadaReading, TensionReading, WireCoil,
};
use precast_qc::engine::{Clock, SystemClock};
use precast_qc::logging;

/// 单个试件及其可选破型结果
#[derive(Debug, Deserialize)]
struct CubeEntry {
    sample: CubeSample,
    #[serde(default)]
    result: Option<CubeResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    filter: ReadingFilter,
    weighments: Vec<BatchWeighment>,
    scada: Vec<ScadaReading>,
    vibration: Vec<Reading>,
    curing: Vec<CuringCycle>,
    tension: Vec<TensionReading>,
    tension_target_kn: Option<f64>,
    cubes: Vec<CubeEntry>,
    required_strength_mpa: Option<f64>,
    moisture: Vec<MoistureTest>,
    wire_coils: Vec<WireCoil>,
}

fn main() -> anyhow::Result<()> {
    match std::env::var("PRECAST_QC_LOG").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let scenario_path = match args.next() {
        Some(p) => p,
        None => bail!("用法: precast-qc <scenario.json> [config.json]"),
    };

    let config = match args.next() {
        Some(path) => ConfigManager::from_file(&path)
            .with_context(|| format!("无法加载配置: {}", path))?,
        None => ConfigManager::default(),
    };
    config.validate()?;
    let config: Arc<dyn QcConfigReader> = Arc::new(config);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let raw = std::fs::read_to_string(&scenario_path)
        .with_context(|| format!("无法读取场景文件: {}", scenario_path))?;
    let scenario: Scenario = serde_json::from_str(&raw).context("场景文件格式错误")?;

    tracing::info!("{} v{}", precast_qc::APP_NAME, precast_qc::VERSION);

    // ===== 配料称量 =====
    let weighment_api = WeighmentApi::new(config.clone(), clock.clone());
    for entry in scenario.weighments {
        weighment_api.record_manual(entry)?;
    }
    for reading in &scenario.scada {
        weighment_api.witness_scada(reading)?;
    }
    let batches: BTreeSet<String> = weighment_api
        .entries_matching(&scenario.filter)?
        .into_iter()
        .filter_map(|v| v.record.payload.keys.batch_no)
        .collect();
    let mut weighment_reports = serde_json::Map::new();
    for batch in batches {
        let reports = weighment_api.batch_report(&batch)?;
        weighment_reports.insert(batch, serde_json::to_value(reports)?);
    }

    // ===== 试件强度 =====
    let cube_api = CubeTestApi::new(config.clone(), clock.clone());
    for entry in scenario.cubes {
        let record = cube_api.declare_sample(entry.sample)?;
        if let Some(result) = entry.result {
            cube_api.record_result(&record.id, result)?;
        }
    }
    let strength = match scenario.required_strength_mpa {
        Some(required) => Some(cube_api.strength_report(&scenario.filter, required)?),
        None => None,
    };

    // ===== 张拉 =====
    let tension = match scenario.tension_target_kn {
        Some(target) => Some(TensionApi::new(config.clone()).tension_report(
            &scenario.tension,
            &scenario.filter,
            target,
        )?),
        None => None,
    };

    // ===== 含水率 =====
    let moisture_api = MoistureApi::new(config.clone());
    let moisture_batches: BTreeSet<String> = scenario
        .filter
        .apply(&scenario.moisture)
        .into_iter()
        .filter_map(|t| t.keys.batch_no.clone())
        .collect();
    let mut mix = serde_json::Map::new();
    for batch in moisture_batches {
        let summary = moisture_api.compute_for_batch(&scenario.moisture, &batch)?;
        mix.insert(batch, serde_json::to_value(summary)?);
    }

    let filter = &scenario.filter;
    let compaction =
        CompactionApi::new(config.clone()).frequency_report(&scenario.vibration, filter);
    let curing = CuringApi::new(config.clone()).curing_report(&scenario.curing, filter);
    let raw_material = RawMaterialApi::new(config).verify_wire(&scenario.wire_coils, filter);

    let output = json!({
        "weighment": weighment_reports,
        "compaction": compaction,
        "curing": curing,
        "tension": tension,
        "strength": strength,
        "mix": mix,
        "raw_material": raw_material,
        "pending_samples": cube_api.pending(filter)?.len(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
