//! MelonLoader mod script export.
//!
//! Generates a C# mod that, once the configured scene is active, builds a
//! legacy `AnimationClip` from embedded coordinate literals and plays it on
//! the target object. Curve breaks become a depth pulse on the z axis that
//! pushes the tracer out of the camera frustum while it jumps between
//! curves.

use std::io::{self, Write};

use super::number::fixed;
use super::{ClipSettings, ClipWriter};
use crate::models::Keyframes;

/// Writer for MelonLoader `.cs` scripts.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    settings: ClipSettings,
}

impl ScriptWriter {
    pub fn new(settings: ClipSettings) -> Self {
        Self { settings }
    }

    /// Interleaved `x,y,x,y,...` literal list.
    fn coordinate_list(&self, keyframes: &Keyframes) -> String {
        let places = self.settings.decimal_places;
        keyframes
            .points()
            .iter()
            .map(|p| format!("{},{}", fixed(p.x, places), fixed(p.y, places)))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn break_list(keyframes: &Keyframes) -> String {
        keyframes.breaks().iter().map(|b| b.to_string()).collect::<Vec<_>>().join(",")
    }
}

impl ClipWriter for ScriptWriter {
    /// The script embeds the data inline, so nothing can be written early.
    fn begin(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn finish(&self, keyframes: &Keyframes, out: &mut dyn Write) -> io::Result<()> {
        let s = &self.settings;
        let script = &s.script;

        write!(
            out,
            "using MelonLoader;\n\
             using UnityEngine;\n\
             using UnityEngine.SceneManagement;\n\
             namespace {namespace}\n\
             {{\n\
             \tpublic class Storage\n\
             \t{{\n\
             \t\tpublic bool isLoaded = false;\n\
             \t}}\n\
             \tpublic class {class} : MelonMod\n\
             \t{{\n\
             \t\tStorage storage;\n\
             \t\tpublic override void OnUpdate()\n\
             \t\t{{\n\
             \t\t\tif(storage == null)\n\
             \t\t\t{{\n\
             \t\t\t\tstorage = new Storage();\n\
             \t\t\t}}\n\
             \t\t\tif(!storage.isLoaded && SceneManager.GetActiveScene().name == \"{scene}\")\n\
             \t\t\t{{\n",
            namespace = script.namespace,
            class = script.class_name,
            scene = script.scene,
        )?;

        // Even indices hold x, odd indices hold y
        writeln!(out, "\t\t\t\tdouble[] dataXY = {{{}}};", self.coordinate_list(keyframes))?;
        // Keyframes at which the tracer sits outside the frustum
        writeln!(out, "\t\t\t\tint[] eocIndices = {{{}}};", Self::break_list(keyframes))?;

        write!(
            out,
            "\t\t\t\tstring clipName = \"{clip}\";\n\
             \t\t\t\tint fps = {fps};\n\
             \t\t\t\tint vecLen = {len};\n\
             \t\t\t\tint eocLen = {eoc_len};\n\
             \t\t\t\tint eocMargin = {margin};\n\
             \t\t\t\tfloat zIn = {z_in}f;\n\
             \t\t\t\tfloat zOut = {z_out}f;\n\
             \t\t\t\tstring[] dims = {{\"x\", \"y\"}};\n\
             \t\t\t\tGameObject osziObj = GameObject.Find(\"{target}\");\n\
             \t\t\t\tAnimation animn = osziObj.GetComponent<Animation>();\n\
             \t\t\t\tAnimationClip clip = new AnimationClip();\n\
             \t\t\t\tKeyframe[] keys = new Keyframe[vecLen];\n\
             \t\t\t\tKeyframe[] keysEoc = new Keyframe[eocLen * 3];\n\
             \t\t\t\tint index;\n\
             \t\t\t\tint dimInd;\n\
             \t\t\t\tif (!animn) animn = osziObj.AddComponent<Animation>();\n\
             \t\t\t\tclip.name = clipName;\n\
             \t\t\t\tclip.legacy = true;\n\
             \t\t\t\tfor(dimInd = 0; dimInd < dims.Length; ++dimInd)\n\
             \t\t\t\t{{\n\
             \t\t\t\t\tfor(index = 0; index < vecLen; ++index)\n\
             \t\t\t\t\t{{\n\
             \t\t\t\t\t\tkeys[index] = new Keyframe((float)index / fps, (float)dataXY[index * dims.Length + dimInd]);\n\
             \t\t\t\t\t}}\n\
             \t\t\t\t\tclip.SetCurve(\"{bone}\", Transform.Il2CppType, \"localPosition.\" + dims[dimInd], new AnimationCurve(keys));\n\
             \t\t\t\t}}\n\
             \t\t\t\tfor(index = 0; index < eocLen; ++index)\n\
             \t\t\t\t{{\n\
             \t\t\t\t\tkeysEoc[index * 3] = new Keyframe((float)(eocIndices[index] - eocMargin) / fps, zIn);\n\
             \t\t\t\t\tkeysEoc[index * 3 + 1] = new Keyframe((float)(eocIndices[index]) / fps, zOut);\n\
             \t\t\t\t\tkeysEoc[index * 3 + 2] = new Keyframe((float)(eocIndices[index] + eocMargin) / fps, zIn);\n\
             \t\t\t\t}}\n\
             \t\t\t\tclip.SetCurve(\"{bone}\", Transform.Il2CppType, \"localPosition.z\", new AnimationCurve(keysEoc));\n\
             \t\t\t\tosziObj.GetComponent<Animator>().enabled = false;\n\
             \t\t\t\tanimn.clip = clip;\n\
             \t\t\t\tanimn.AddClip(clip, clip.name);\n\
             \t\t\t\tanimn.wrapMode = WrapMode.Loop;\n\
             \t\t\t\tanimn.Play();\n\
             \t\t\t\tstorage.isLoaded = true;\n\
             \t\t\t\tMelonLogger.Msg(\"{message}\");\n\
             \t\t\t}}\n\
             \t\t}}\n\
             \t}}\n\
             }}\n",
            clip = s.clip_name,
            fps = s.sample_rate,
            len = keyframes.len(),
            eoc_len = keyframes.breaks().len(),
            margin = s.break_margin,
            z_in = fixed(s.z_in, s.decimal_places),
            z_out = fixed(s.z_out, s.decimal_places),
            target = script.target_object,
            bone = s.bone_path,
            message = script.loaded_message,
        )
    }

    fn format_name(&self) -> &'static str {
        "MelonLoader mod script"
    }
}
