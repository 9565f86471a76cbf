use serde::{Deserialize, Serialize};

/// Names of the uniforms and attributes the outline pass looks up in its generated programs.
///
/// The shader source provider and this table must agree, the defaults match the naming of the
/// built-in outline shader generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlineShaderNaming {
  pub positions_decode_matrix: String,
  pub uv_decode_matrix: String,
  pub model_matrix: String,
  pub model_normal_matrix: String,
  pub view_matrix: String,
  pub projection_matrix: String,
  pub color: String,
  pub width: String,
  pub clippable: String,
  pub gamma_factor: String,
  /// the clip plane index is appended, `clipActive0`, `clipActive1`...
  pub clip_active_prefix: String,
  pub clip_position_prefix: String,
  pub clip_direction_prefix: String,
  pub position_attribute: String,
  pub normal_attribute: String,
}

impl Default for OutlineShaderNaming {
  fn default() -> Self {
    Self {
      positions_decode_matrix: "positionsDecodeMatrix".into(),
      uv_decode_matrix: "uvDecodeMatrix".into(),
      model_matrix: "modelMatrix".into(),
      model_normal_matrix: "modelNormalMatrix".into(),
      view_matrix: "viewMatrix".into(),
      projection_matrix: "projMatrix".into(),
      color: "color".into(),
      width: "width".into(),
      clippable: "clippable".into(),
      gamma_factor: "gammaFactor".into(),
      clip_active_prefix: "clipActive".into(),
      clip_position_prefix: "clipPos".into(),
      clip_direction_prefix: "clipDir".into(),
      position_attribute: "position".into(),
      normal_attribute: "normal".into(),
    }
  }
}

impl OutlineShaderNaming {
  pub fn clip_active(&self, index: usize) -> String {
    format!("{}{index}", self.clip_active_prefix)
  }
  pub fn clip_position(&self, index: usize) -> String {
    format!("{}{index}", self.clip_position_prefix)
  }
  pub fn clip_direction(&self, index: usize) -> String {
    format!("{}{index}", self.clip_direction_prefix)
  }
}

#[test]
fn clip_uniform_names() {
  let naming = OutlineShaderNaming::default();
  assert_eq!(naming.clip_active(0), "clipActive0");
  assert_eq!(naming.clip_position(2), "clipPos2");
  assert_eq!(naming.clip_direction(11), "clipDir11");
}

#[test]
fn partial_naming_config_keeps_defaults() {
  let naming: OutlineShaderNaming =
    serde_json::from_str(r#"{ "width": "outlineWidth", "clipActivePrefix": "clipOn" }"#).unwrap();
  assert_eq!(naming.width, "outlineWidth");
  assert_eq!(naming.clip_active(1), "clipOn1");
  assert_eq!(
    naming,
    OutlineShaderNaming {
      width: "outlineWidth".into(),
      clip_active_prefix: "clipOn".into(),
      ..Default::default()
    }
  );
}
