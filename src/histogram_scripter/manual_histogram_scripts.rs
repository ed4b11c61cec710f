use crate::histoer::configs::{AxisConfig, Binning, HistogramSpec};

fn fixed(name: &str, count: usize, low: f64, high: f64) -> AxisConfig {
    AxisConfig::new(name, Binning::FixedWidth { count, low, high })
}

#[rustfmt::skip]
#[expect(clippy::vec_init_then_push)]
pub fn vbs_histograms() -> Vec<HistogramSpec> {

    let mut histograms = vec![];

    // Leptons and MET
    histograms.push(HistogramSpec::fixed_1d("lept1_pt", 40, 0.0, 2000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("lept1_eta", 26, -2.6, 2.6));
    histograms.push(HistogramSpec::fixed_1d("lept1_phi", 34, -3.4, 3.4));
    histograms.push(HistogramSpec::fixed_1d("pf_met_corr", 20, 0.0, 1000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("pf_met_corr_phi", 34, -3.4, 3.4));

    // AK8 jet
    histograms.push(HistogramSpec::fixed_1d("fatjet_m", 80, 0.0, 400.0).folded());
    histograms.push(HistogramSpec::fixed_1d("fatjet_pt", 80, 200.0, 2000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("fatjet_eta", 26, -2.6, 2.6));
    histograms.push(HistogramSpec::fixed_1d("fatjet_phi", 34, -3.4, 3.4));
    histograms.push(HistogramSpec::fixed_1d("fatjet_n2b1", 40, 0.0, 0.5).folded());
    histograms.push(HistogramSpec::fixed_1d("fatjet_n2b2", 40, 0.0, 0.4).folded());
    histograms.push(HistogramSpec::fixed_1d("fatjet_tau21", 40, 0.0, 1.0).folded());

    // W
    histograms.push(HistogramSpec::fixed_1d("w_pt", 50, 0.0, 2000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("w_eta", 51, -5.1, 5.1));
    histograms.push(HistogramSpec::fixed_1d("w_mt", 40, 0.0, 2000.0).folded());

    // VBF jets
    histograms.push(HistogramSpec::fixed_1d("vbf_j1_pt", 120, 0.0, 2000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("vbf_j2_pt", 40, 0.0, 2000.0).folded());
    histograms.push(HistogramSpec::fixed_1d("vbf_j1_eta", 51, -5.1, 5.1));
    histograms.push(HistogramSpec::fixed_1d("vbf_j2_eta", 51, -5.1, 5.1));
    histograms.push(HistogramSpec::fixed_1d("vbf_jj_Deta", 20, 0.0, 10.0));
    histograms.push(HistogramSpec::fixed_1d("vbf_j1_phi", 34, -3.4, 3.4));
    histograms.push(HistogramSpec::fixed_1d("vbf_j2_phi", 34, -3.4, 3.4));
    histograms.push(HistogramSpec::fixed_1d("vbf_jj_m", 40, 500.0, 2500.0));

    // Centrality
    histograms.push(HistogramSpec::fixed_1d("boson_centrality", 60, -6.0, 6.0));
    histograms.push(HistogramSpec::fixed_1d("zeppenfeld_w_Deta", 40, -4.0, 4.0));
    histograms.push(HistogramSpec::fixed_1d("zeppenfeld_v_Deta", 40, -4.0, 4.0));

    // WV system
    histograms.push(HistogramSpec::fixed_1d("wv_m", 50, 0.0, 2500.0).folded());
    histograms.push(HistogramSpec::variable_1d("wv_m_8bin", &[600.0, 700.0, 800.0, 900.0, 1000.0, 1200.0, 1500.0, 2000.0, 2500.0]).reading("wv_m").folded());
    histograms.push(HistogramSpec::fixed_1d("wv_pt", 60, 0.0, 600.0).folded());
    histograms.push(HistogramSpec::fixed_1d("wv_eta", 20, -5.0, 5.0));
    histograms.push(HistogramSpec::fixed_1d("wv_phi", 34, -3.4, 3.4));

    // Booked for the plotting side, the score column is not in the records
    histograms.push(HistogramSpec::fixed_1d("mva_score", 40, -1.0, 1.0).never_filled());

    // Jet substructure correlations
    histograms.push(HistogramSpec::new_2d(fixed("n2b1", 40, 0.0, 0.5).with_column("fatjet_n2b1"), fixed("tau21", 40, 0.0, 1.0).with_column("fatjet_tau21")));
    histograms.push(HistogramSpec::new_2d(fixed("n2b2", 40, 0.0, 0.4).with_column("fatjet_n2b2"), fixed("tau21", 40, 0.0, 1.0).with_column("fatjet_tau21")));

    histograms
}
