use crate::error::Error;
use crate::util::anyerror::Fault;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Child, Stdio};

/// Removes the verbose dot notation from displaying a path as a string.
pub fn into_std_str(path: PathBuf) -> String {
    let mut s = path.display().to_string();
    if s.starts_with("./") == true {
        s.replace_range(0..2, "");
    }
    s
}

/// Spawns a child process running `command` with `args` from the `cwd` directory
/// and the extra environment variables `envs`.
pub fn invoke(
    cwd: &PathBuf,
    command: &String,
    args: &Vec<String>,
    envs: HashMap<&String, &String>,
) -> Result<Child, Fault> {
    Ok(std::process::Command::new(command)
        .current_dir(cwd)
        .args(args)
        .envs(envs)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?)
}

/// Waits on the child process and maps its exit status into a result.
pub fn wait_on(mut proc: Child) -> Result<(), Fault> {
    let exit_code = proc.wait()?;
    match exit_code.code() {
        Some(num) => {
            if num != 0 {
                Err(Error::ChildProcErrorCode(num))?
            } else {
                Ok(())
            }
        }
        None => Err(Error::ChildProcTerminated)?,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clean_displayed_path() {
        assert_eq!(
            into_std_str(PathBuf::from("./temp/xsim")),
            String::from("temp/xsim")
        );
        assert_eq!(
            into_std_str(PathBuf::from("temp/xsim")),
            String::from("temp/xsim")
        );
    }
}
